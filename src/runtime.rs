//! Runtime helpers shared across binaries.
//!
//! Logging setup and environment-driven source discovery used by both CLIs.

use anyhow::{Context, Result};
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Comma- or whitespace-separated list of engine configuration files.
pub const CONFIG_PATHS_ENV: &str = "CARCONTROL_CONFIG_PATHS";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Split comma- or whitespace-delimited configuration lists into tokens.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration paths named by [`CONFIG_PATHS_ENV`], in order.
pub fn config_paths_from_env() -> Vec<PathBuf> {
    env::var(CONFIG_PATHS_ENV)
        .map(|raw| split_list(&raw).into_iter().map(PathBuf::from).collect())
        .unwrap_or_default()
}

/// Open every path for reading; the first missing file is an error.
pub fn open_sources(paths: &[PathBuf]) -> Result<Vec<File>> {
    paths.iter().map(|path| open_source(path)).collect()
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("opening configuration {}", path.display()))
}
