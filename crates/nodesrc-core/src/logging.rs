//! Tracing setup for the `nodesrc` binary.
//!
//! Events go to `$XDG_STATE_HOME/nodesrc/nodesrc.log` so the single progress
//! line on stdout stays clean. The CLI falls back to stderr when the state
//! directory cannot be used.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "NODESRC_LOG";

const LOG_FILE_NAME: &str = "nodesrc.log";
const DEFAULT_DIRECTIVES: &str = "info,nodesrc=debug,nodesrc_core=debug";

/// Where [`init_logging`] writes.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("nodesrc")?;
    Ok(xdg_dirs.get_state_home().join(LOG_FILE_NAME))
}

fn directives(nodesrc_log: Option<String>, rust_log: Option<String>) -> String {
    [nodesrc_log, rust_log]
        .into_iter()
        .flatten()
        .find(|d| !d.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVES.to_string())
}

fn env_filter() -> EnvFilter {
    let wanted = directives(
        std::env::var(LOG_ENV).ok(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    );
    EnvFilter::try_new(&wanted).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs a subscriber appending to [`log_file_path`] and returns that path.
///
/// Errors when the state directory or log file cannot be opened, or a
/// subscriber is already installed.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_file_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber: {}", e))?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), log = %path.display(), "nodesrc starting");
    Ok(path)
}

/// Stderr-only subscriber for when [`init_logging`] fails.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodesrc_log_wins_over_rust_log() {
        assert_eq!(
            directives(Some("nodesrc_core=trace".into()), Some("warn".into())),
            "nodesrc_core=trace"
        );
        assert_eq!(directives(None, Some("warn".into())), "warn");
    }

    #[test]
    fn blank_directives_fall_back_to_default() {
        assert_eq!(directives(Some("  ".into()), None), DEFAULT_DIRECTIVES);
        assert_eq!(directives(None, None), DEFAULT_DIRECTIVES);
    }

    #[test]
    fn default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }

    #[test]
    fn log_file_lives_in_state_dir() {
        if let Ok(path) = log_file_path() {
            assert!(path.ends_with("nodesrc/nodesrc.log"), "{}", path.display());
        }
    }
}
