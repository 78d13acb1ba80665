//! XDG Base Directory support for questboard.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "questboard";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/questboard` or `~/.config/questboard`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the cache directory following XDG conventions.
///
/// Log files land here unless `[logging].file_path` overrides it.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}
