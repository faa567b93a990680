pub mod config;
pub mod logging;

pub mod archiver;
pub mod cdx;
pub mod checksum;
pub mod download_log;
pub mod downloader;
pub mod extension;
pub mod fetch;
