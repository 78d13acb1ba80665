//! Configuration management for questboard.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

pub mod constants;
mod settings;
mod xdg;

pub use settings::{Config, GeneralSettings, LoggingSettings, SheetSettings, UserSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "neon";
    pub const PLATFORM: &str = "auto";
    pub const NAV_BAR_HEIGHT: u16 = 2;
    pub const BOTTOM_INSET: u16 = 1;
    pub const TOP_INSET: u16 = 0;
    pub const BACKDROP_OPACITY: f32 = 0.5;
    pub const ANIMATION_FRAMES: u16 = 6;
    pub const INITIAL_SNAP_INDEX: usize = 0;
    pub const DISPLAY_NAME: &str = "User";
    pub const MIN_LOG_LEVEL: &str = "info";
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates config file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        let config = Self::load_from(&config_path)?;
        Self::ensure_themes_dir()?;
        Ok(config)
    }

    /// Load configuration from an explicit path.
    ///
    /// Missing keys are filled with defaults and the normalized content is
    /// written back when it differs from what was on disk.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&original_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn get_themes_dir() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes"))
    }

    fn ensure_themes_dir() -> Result<()> {
        let themes_dir = Self::get_themes_dir()?;
        if !themes_dir.exists() {
            std::fs::create_dir_all(themes_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.sheet.nav_bar_height, defaults::NAV_BAR_HEIGHT);
        assert_eq!(config.general.theme, defaults::THEME_NAME);
    }

    #[test]
    fn test_missing_keys_are_filled_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sheet]\nnav_bar_height = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sheet.nav_bar_height, 4);
        assert_eq!(config.sheet.animation_frames, defaults::ANIMATION_FRAMES);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("animation_frames"));
        assert!(rewritten.contains("[user]"));
    }

    #[test]
    fn test_bad_types_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[sheet]\nnav_bar_height = \"tall\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
