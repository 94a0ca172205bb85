use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub(crate) const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/v1";

pub(crate) struct Config {
    pub(crate) base_url: String,
}

impl Config {
    /// Base URL, in precedence order: CLI argument, `VYTRATUI_API_URL`,
    /// the localhost default.
    pub(crate) fn resolve(arg: Option<String>) -> Self {
        let base_url = arg
            .or_else(|| std::env::var("VYTRATUI_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self { base_url }
    }
}

/// Logs go to a file in the platform data directory; the TUI owns the
/// terminal. Level comes from `RUST_LOG`, defaulting to `info`.
pub(crate) fn init_logging() -> Result<()> {
    let proj_dirs = directories::ProjectDirs::from("com", "vytratui", "VytraTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("vytratui.log"))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_cli_argument_wins() {
        let config = Config::resolve(Some("http://10.0.0.2:9000/api/v1".into()));
        assert_eq!(config.base_url, "http://10.0.0.2:9000/api/v1");
    }

    #[test]
    fn test_default_url_used_without_argument() {
        // Only meaningful when the env var is unset, as in CI.
        if std::env::var("VYTRATUI_API_URL").is_err() {
            let config = Config::resolve(None);
            assert_eq!(config.base_url, DEFAULT_API_URL);
        }
    }
}
