//! Persistent record of snapshot URLs already processed.
//!
//! Append-only newline-delimited text file, loaded once at startup into an
//! in-memory set. A logged URL is never fetched again while the log file
//! persists; the log only grows. Single-writer: concurrent appends from
//! multiple processes are out of scope.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Membership log of processed snapshot URLs, backed by an append-only file.
pub struct DownloadLog {
    seen: HashSet<String>,
    file: File,
    path: PathBuf,
}

impl DownloadLog {
    /// Open the log at `path`, loading all existing entries. A missing file
    /// is an empty log, not an error; it is created on open.
    pub fn open(path: &Path) -> Result<Self> {
        let seen = match std::fs::read_to_string(path) {
            Ok(data) => data
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_owned)
                .collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("read download log {}", path.display()))
            }
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open download log {}", path.display()))?;

        Ok(Self {
            seen,
            file,
            path: path.to_path_buf(),
        })
    }

    /// True if `url` was already recorded (this run or a previous one).
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Append `url` to the log and flush immediately, so a crash right after
    /// a stored download still leaves a correct resume point.
    pub fn record(&mut self, url: &str) -> Result<()> {
        writeln!(self.file, "{url}")
            .and_then(|_| self.file.flush())
            .with_context(|| format!("append to download log {}", self.path.display()))?;
        self.seen.insert(url.to_string());
        Ok(())
    }

    /// Number of recorded URLs.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
