//! Minimal HTTP/1.1 server simulating a web archive for integration tests.
//!
//! Serves the CDX lookup endpoint (JSON array of arrays, header row first,
//! filtered by the `url` query parameter) and replay URLs under `/web/`.
//! Counts replay fetches so tests can assert that resumed runs re-fetch
//! nothing. The server runs until the process exits.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// One capture the fake archive knows about.
#[derive(Debug, Clone)]
pub struct SnapshotSpec {
    pub timestamp: String,
    pub original: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl SnapshotSpec {
    pub fn html(timestamp: &str, original: &str, body: &[u8]) -> Self {
        Self {
            timestamp: timestamp.to_string(),
            original: original.to_string(),
            body: body.to_vec(),
            content_type: Some("text/html; charset=utf-8".to_string()),
        }
    }
}

pub struct ArchiveServer {
    /// Host:port to hand to `CdxClient::with_host`.
    pub host: String,
    fetches: Arc<AtomicUsize>,
}

impl ArchiveServer {
    /// Number of `/web/` replay fetches served so far.
    pub fn snapshot_fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

/// Starts a server that answers CDX lookups from `specs` with status 200.
pub fn start(specs: Vec<SnapshotSpec>) -> ArchiveServer {
    start_with_index_status(specs, 200)
}

/// Like `start`, but the CDX endpoint answers with `index_status` (e.g. 503
/// to simulate a throttled index while replay URLs keep working).
pub fn start_with_index_status(specs: Vec<SnapshotSpec>, index_status: u32) -> ArchiveServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let specs = Arc::new(specs);
    let fetches = Arc::new(AtomicUsize::new(0));
    let fetches_srv = Arc::clone(&fetches);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let specs = Arc::clone(&specs);
            let fetches = Arc::clone(&fetches_srv);
            thread::spawn(move || handle(stream, &specs, index_status, &fetches));
        }
    });
    ArchiveServer {
        host: format!("127.0.0.1:{port}"),
        fetches,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    specs: &[SnapshotSpec],
    index_status: u32,
    fetches: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = match request_path(request) {
        Some(p) => p,
        None => return,
    };

    if path.starts_with("/cdx/search/cdx") {
        if index_status != 200 {
            let response = format!(
                "HTTP/1.1 {index_status} Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            );
            let _ = stream.write_all(response.as_bytes());
            return;
        }
        let body = cdx_body(specs, path);
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(&body);
        return;
    }

    if let Some(rest) = path.strip_prefix("/web/") {
        fetches.fetch_add(1, Ordering::SeqCst);
        if let Some((timestamp, original)) = rest.split_once('/') {
            if let Some(spec) = specs
                .iter()
                .find(|s| s.timestamp == timestamp && s.original == original)
            {
                let content_type = spec
                    .content_type
                    .as_deref()
                    .map(|ct| format!("Content-Type: {ct}\r\n"))
                    .unwrap_or_default();
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
                    spec.body.len(),
                    content_type
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.write_all(&spec.body);
                return;
            }
        }
        let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
        return;
    }

    let _ = stream.write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n");
}

/// Path (with query string) of the request line, e.g. `/cdx/search/cdx?url=...`.
fn request_path(request: &str) -> Option<&str> {
    let line = request.lines().next()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?;
    if !method.eq_ignore_ascii_case("GET") {
        return None;
    }
    parts.next()
}

/// CDX JSON body: header row plus one row per spec whose `original` matches
/// the (percent-decoded) `url` query parameter.
fn cdx_body(specs: &[SnapshotSpec], path: &str) -> Vec<u8> {
    let requested = url::Url::parse(&format!("http://unused{path}"))
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "url")
                .map(|(_, v)| v.into_owned())
        });

    let mut rows: Vec<Vec<String>> = vec![vec!["timestamp".to_string(), "original".to_string()]];
    for spec in specs {
        if requested.as_deref().map_or(true, |u| u == spec.original) {
            rows.push(vec![spec.timestamp.clone(), spec.original.clone()]);
        }
    }
    serde_json::to_vec(&rows).expect("serialize cdx rows")
}
