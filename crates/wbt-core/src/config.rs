use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/wbt/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WbtConfig {
    /// Per-request timeout in seconds for index lookups and snapshot fetches.
    pub request_timeout_secs: u64,
    /// Hostname of the web archive (index endpoint and replay endpoint).
    pub archive_host: String,
    /// Optional User-Agent header sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for WbtConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            archive_host: "web.archive.org".to_string(),
            user_agent: None,
        }
    }
}

impl WbtConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wbt")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<WbtConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = WbtConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: WbtConfig = toml::from_str(&data)?;
    Ok(cfg)
}
