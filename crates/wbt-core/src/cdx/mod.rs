//! Snapshot index (CDX) client.
//!
//! Queries the archive's CDX endpoint for the known captures of a URL,
//! restricted server-side to captures that answered HTTP 200. The secure
//! endpoint is tried first; a single fallback to plain HTTP runs only when
//! the connection itself could not be established. Any other failure makes
//! the lookup degrade to an empty result, reported but never fatal.

mod parse;

use crate::config::WbtConfig;
use crate::fetch::{self, FetchError};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// One archived capture, addressable by a timestamp-qualified replay URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Archive-assigned capture time (opaque, sort-stable token).
    pub timestamp: String,
    /// Fully qualified, directly fetchable address of the capture.
    pub replay_url: String,
}

/// Error from a single lookup attempt.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("malformed index body: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bad index URL: {0}")]
    Url(#[from] url::ParseError),
}

impl IndexError {
    fn is_connection_error(&self) -> bool {
        matches!(self, IndexError::Fetch(e) if e.is_connection_error())
    }
}

/// Client for the archive's CDX lookup endpoint.
pub struct CdxClient {
    host: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl CdxClient {
    pub fn new(cfg: &WbtConfig) -> Self {
        Self {
            host: cfg.archive_host.clone(),
            timeout: cfg.request_timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }

    /// Client against a specific host (tests point this at a local server).
    pub fn with_host(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
            user_agent: None,
        }
    }

    /// All successful captures of `target_url`, in index order (oldest first
    /// as observed). Lookup failures are logged and yield an empty list so
    /// the caller can move on to the next target.
    pub fn snapshots_for(&self, target_url: &str) -> Vec<Snapshot> {
        match self.query("https", target_url) {
            Ok(snapshots) => snapshots,
            Err(e) if e.is_connection_error() => {
                tracing::warn!("https index lookup failed for {target_url}: {e}; retrying over http");
                match self.query("http", target_url) {
                    Ok(snapshots) => snapshots,
                    Err(e) => {
                        tracing::warn!(
                            "index lookup for {target_url} failed over https and http: {e}"
                        );
                        Vec::new()
                    }
                }
            }
            Err(e) => {
                tracing::warn!("index lookup failed for {target_url}: {e}");
                Vec::new()
            }
        }
    }

    /// One lookup attempt over `scheme`. Replay URLs are built on the same
    /// scheme, so descriptors from an HTTP fallback stay fetchable even while
    /// HTTPS is unreachable.
    fn query(&self, scheme: &str, target_url: &str) -> Result<Vec<Snapshot>, IndexError> {
        let mut endpoint = Url::parse(&format!("{scheme}://{}/cdx/search/cdx", self.host))?;
        endpoint
            .query_pairs_mut()
            .append_pair("url", target_url)
            .append_pair("output", "json")
            .append_pair("fl", "timestamp,original")
            .append_pair("filter", "statuscode:200");

        let body = fetch::get(endpoint.as_str(), self.timeout, self.user_agent.as_deref())?;
        let snapshots = parse::parse_rows(&body.bytes)?
            .into_iter()
            .map(|(timestamp, original)| Snapshot {
                replay_url: format!("{scheme}://{}/web/{timestamp}/{original}", self.host),
                timestamp,
            })
            .collect();
        Ok(snapshots)
    }
}
