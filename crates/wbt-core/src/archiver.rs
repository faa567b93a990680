//! Sequential archival orchestrator.
//!
//! Drives the index client and downloader over a list of target URLs. Each
//! target gets a fresh within-run digest set, so content duplicates are
//! collapsed per target but may be stored again for a different target.

use crate::cdx::CdxClient;
use crate::download_log::DownloadLog;
use crate::downloader::{Downloader, Outcome};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Per-target completion accounting for the end-of-run summary.
///
/// `completed` counts descriptors that reached a handled terminal state:
/// stored, duplicate-skipped, or skipped because already logged. Fetch
/// failures leave a visible shortfall against `total`.
#[derive(Debug)]
pub struct TargetReport {
    pub url: String,
    pub total: usize,
    pub completed: usize,
}

/// Read target URLs from a newline-delimited file, ignoring blank lines.
pub fn read_targets(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read target list {}", path.display()))?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
        .collect())
}

/// Archive every target in order, one snapshot at a time.
///
/// Index lookups and snapshot fetches never abort the run; only local
/// filesystem errors (output writes, log appends) propagate.
pub fn archive_targets(
    targets: &[String],
    cdx: &CdxClient,
    downloader: &Downloader,
    log: &mut DownloadLog,
    output_dir: &Path,
) -> Result<Vec<TargetReport>> {
    let mut reports = Vec::with_capacity(targets.len());

    for (index, target) in targets.iter().enumerate() {
        tracing::info!("processing target {}/{}: {target}", index + 1, targets.len());

        let snapshots = cdx.snapshots_for(target);
        if snapshots.is_empty() {
            tracing::info!("no snapshots found for {target}");
            reports.push(TargetReport {
                url: target.clone(),
                total: 0,
                completed: 0,
            });
            continue;
        }
        tracing::info!("found {} snapshot(s) for {target}", snapshots.len());

        // Within-run dedup is scoped to this target.
        let mut seen_digests: HashSet<String> = HashSet::new();
        let mut completed = 0usize;

        for snapshot in &snapshots {
            if log.contains(&snapshot.replay_url) {
                tracing::info!("already downloaded, skipping {}", snapshot.replay_url);
                completed += 1;
                continue;
            }
            match downloader.fetch_snapshot(snapshot, output_dir, &seen_digests, log)? {
                Outcome::Stored { digest, .. } => {
                    seen_digests.insert(digest);
                    completed += 1;
                }
                Outcome::DuplicateContent { .. } => completed += 1,
                Outcome::FetchFailed => {}
            }
        }

        tracing::info!(
            "completed snapshots for {target}: {completed}/{}",
            snapshots.len()
        );
        reports.push(TargetReport {
            url: target.clone(),
            total: snapshots.len(),
            completed,
        });
    }

    Ok(reports)
}
