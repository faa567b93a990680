//! `wbt run` – archive every indexed snapshot for the listed URLs.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wbt_core::archiver::{archive_targets, read_targets};
use wbt_core::cdx::CdxClient;
use wbt_core::config::WbtConfig;
use wbt_core::download_log::DownloadLog;
use wbt_core::downloader::Downloader;

pub fn run_archive(
    cfg: &WbtConfig,
    input: &Path,
    output_dir: &Path,
    log_file: &Path,
) -> Result<()> {
    let targets = read_targets(input)?;
    println!("Total URLs to process: {}", targets.len());

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let mut log = DownloadLog::open(log_file)?;
    if !log.is_empty() {
        tracing::info!("resuming with {} previously logged snapshot(s)", log.len());
    }

    let cdx = CdxClient::new(cfg);
    let downloader = Downloader::new(cfg);
    let reports = archive_targets(&targets, &cdx, &downloader, &mut log, output_dir)?;

    for report in &reports {
        println!(
            "Completed snapshots for {}: {}/{}",
            report.url, report.completed, report.total
        );
    }
    Ok(())
}
