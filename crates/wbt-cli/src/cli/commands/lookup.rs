//! `wbt lookup <url>` – list indexed snapshots without downloading.

use anyhow::Result;
use wbt_core::cdx::CdxClient;
use wbt_core::config::WbtConfig;

pub fn run_lookup(cfg: &WbtConfig, url: &str) -> Result<()> {
    let client = CdxClient::new(cfg);
    let snapshots = client.snapshots_for(url);

    if snapshots.is_empty() {
        println!("No snapshots found for URL: {url}");
        return Ok(());
    }

    println!("{:<16} URL", "TIMESTAMP");
    for snapshot in &snapshots {
        println!("{:<16} {}", snapshot.timestamp, snapshot.replay_url);
    }
    println!("{} snapshot(s)", snapshots.len());
    Ok(())
}
