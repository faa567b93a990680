//! Snapshot download, content dedup, and artifact naming.
//!
//! Fetches one capture, hashes the full body, and stores it under
//! `{timestamp}_{digest_prefix8}{extension}` unless the same content was
//! already stored for the current target. Network failures are reported and
//! yield no artifact; only local filesystem errors propagate.

use crate::cdx::Snapshot;
use crate::checksum;
use crate::config::WbtConfig;
use crate::download_log::DownloadLog;
use crate::extension;
use crate::fetch;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Hex characters of the digest carried in the filename. Enough to keep
/// same-timestamp captures with different content from colliding.
const DIGEST_PREFIX_LEN: usize = 8;

/// Result of processing one snapshot descriptor.
#[derive(Debug)]
pub enum Outcome {
    /// Body stored as a new artifact; the digest enters the within-run set.
    Stored { digest: String, path: PathBuf },
    /// Body matched a digest already stored for this target. No artifact,
    /// and deliberately no download-log entry (URL-level skips and
    /// content-level skips stay independent).
    DuplicateContent { digest: String },
    /// The fetch failed; reported, no artifact, processing continues.
    FetchFailed,
}

/// Downloads snapshot bodies and writes deduplicated artifacts.
pub struct Downloader {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Downloader {
    pub fn new(cfg: &WbtConfig) -> Self {
        Self {
            timeout: cfg.request_timeout(),
            user_agent: cfg.user_agent.clone(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            user_agent: None,
        }
    }

    /// Process one snapshot: fetch, hash, dedup against `seen_digests`,
    /// store, and record the replay URL in `log`.
    ///
    /// `seen_digests` is the within-run set for the current target; the
    /// caller inserts the digest of a `Stored` outcome.
    pub fn fetch_snapshot(
        &self,
        snapshot: &Snapshot,
        output_dir: &Path,
        seen_digests: &HashSet<String>,
        log: &mut DownloadLog,
    ) -> Result<Outcome> {
        let body = match fetch::get(&snapshot.replay_url, self.timeout, self.user_agent.as_deref())
        {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("snapshot fetch failed for {}: {e}", snapshot.replay_url);
                return Ok(Outcome::FetchFailed);
            }
        };

        let digest = checksum::sha256_bytes(&body.bytes);
        if seen_digests.contains(&digest) {
            tracing::info!(
                "content already stored for this target, skipping {}",
                snapshot.replay_url
            );
            return Ok(Outcome::DuplicateContent { digest });
        }

        let ext = extension::resolve(&snapshot.replay_url, body.content_type.as_deref());
        let filename = format!(
            "{}_{}{}",
            snapshot.timestamp,
            &digest[..DIGEST_PREFIX_LEN],
            ext
        );
        let path = output_dir.join(filename);
        fs::write(&path, &body.bytes).with_context(|| format!("write {}", path.display()))?;
        log.record(&snapshot.replay_url)?;

        tracing::info!("stored {}", path.display());
        Ok(Outcome::Stored { digest, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failure_is_a_non_fatal_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = DownloadLog::open(&dir.path().join("log")).unwrap();
        let snapshot = Snapshot {
            timestamp: "20200101000000".into(),
            // Unroutable without a server; fetch must fail fast.
            replay_url: "http://127.0.0.1:1/web/20200101000000/http://example.com/".into(),
        };

        let downloader = Downloader::with_timeout(Duration::from_secs(2));
        let outcome = downloader
            .fetch_snapshot(&snapshot, dir.path(), &HashSet::new(), &mut log)
            .unwrap();

        assert!(matches!(outcome, Outcome::FetchFailed));
        assert!(log.is_empty(), "failed fetch must not be logged");
    }
}
