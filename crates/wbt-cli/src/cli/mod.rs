//! CLI for the WBT snapshot archiver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wbt_core::config;

use commands::{run_archive, run_checksum, run_lookup};

/// Top-level CLI for the WBT snapshot archiver.
#[derive(Debug, Parser)]
#[command(name = "wbt")]
#[command(about = "WBT: incremental Wayback Machine snapshot archiver", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every indexed snapshot for the URLs listed in a file.
    Run {
        /// File containing target URLs, one per line (blank lines ignored).
        input: PathBuf,

        /// Directory for stored snapshots (created if absent).
        #[arg(long, default_value = "downloads")]
        output_dir: PathBuf,

        /// Download log tracking processed snapshot URLs; lets an
        /// interrupted run resume without re-downloading.
        #[arg(long, default_value = "downloaded_urls.log")]
        log_file: PathBuf,
    },

    /// List indexed snapshots for a single URL without downloading.
    Lookup {
        /// Original URL to look up in the archive's index.
        url: String,
    },

    /// Compute SHA-256 of a file (e.g. a stored snapshot).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                input,
                output_dir,
                log_file,
            } => run_archive(&cfg, &input, &output_dir, &log_file)?,
            CliCommand::Lookup { url } => run_lookup(&cfg, &url)?,
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
