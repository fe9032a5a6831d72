use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::CurlOptions;
use crate::url_model::DEFAULT_DIST_HOST;

/// Node.js release fetched when nothing else is configured.
pub const DEFAULT_NODE_VERSION: &str = "v21.7.3";

/// Environment variable that overrides the configured version.
pub const VERSION_ENV: &str = "RUST_NODE_VERSION";

/// Global configuration loaded from `~/.config/nodesrc/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSrcConfig {
    /// Release tag, e.g. "v21.7.3". Used verbatim in the dist URL.
    pub node_version: String,
    /// Host serving the `/dist/` tree.
    pub dist_host: String,
    /// Local filename of the downloaded archive (relative to the working directory).
    pub archive_name: String,
    /// Report download progress every N received blocks.
    pub download_report_every: u32,
    /// Report extraction progress every N archive members.
    pub extract_report_every: u32,
    pub connect_timeout_secs: u64,
    /// Abort when the transfer stays below this many bytes/sec for `low_speed_time_secs`.
    pub low_speed_limit: u32,
    pub low_speed_time_secs: u64,
}

impl Default for NodeSrcConfig {
    fn default() -> Self {
        Self {
            node_version: DEFAULT_NODE_VERSION.to_string(),
            dist_host: DEFAULT_DIST_HOST.to_string(),
            archive_name: "node_src.tar.gz".to_string(),
            download_report_every: 5,
            extract_report_every: 100,
            connect_timeout_secs: 30,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
        }
    }
}

impl NodeSrcConfig {
    /// Picks the version to fetch: CLI flag, then `RUST_NODE_VERSION`, then the config file.
    pub fn resolve_version(&self, cli_flag: Option<&str>) -> String {
        let env = std::env::var(VERSION_ENV).ok();
        pick_version(cli_flag, env.as_deref(), &self.node_version)
    }

    pub fn curl_options(&self) -> CurlOptions {
        CurlOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            low_speed_limit: self.low_speed_limit,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            user_agent: format!("nodesrc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn pick_version(cli_flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [cli_flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(configured)
        .to_string()
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nodesrc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NodeSrcConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NodeSrcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: NodeSrcConfig = toml::from_str(&data)?;
    Ok(cfg)
}
