//! Configuration structures for questboard settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Bottom sheet settings
    #[serde(default)]
    pub sheet: SheetSettings,

    /// Signed-in user shown in the side menu
    #[serde(default)]
    pub user: UserSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Platform family for inset handling (ios, android, or auto)
    #[serde(default = "default_platform")]
    pub platform: String,
}

/// Bottom sheet settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSettings {
    /// Rows reserved for the navigation bar below the sheet
    #[serde(default = "default_nav_bar_height")]
    pub nav_bar_height: u16,

    /// Simulated bottom safe-area inset in rows
    #[serde(default = "default_bottom_inset")]
    pub bottom_inset: u16,

    /// Simulated top safe-area inset in rows
    #[serde(default = "default_top_inset")]
    pub top_inset: u16,

    /// Backdrop dimming strength (0.0 - 1.0)
    #[serde(default = "default_backdrop_opacity")]
    pub backdrop_opacity: f32,

    /// Ticks needed for a present or dismiss animation
    #[serde(default = "default_animation_frames")]
    pub animation_frames: u16,

    /// Snap point the sheet opens at (0 = smallest)
    #[serde(default = "default_initial_snap_index")]
    pub initial_snap_index: usize,
}

/// User profile settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default = "default_display_name")]
    pub display_name: String,

    #[serde(default)]
    pub email: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_platform() -> String {
    defaults::PLATFORM.to_string()
}

fn default_nav_bar_height() -> u16 {
    defaults::NAV_BAR_HEIGHT
}

fn default_bottom_inset() -> u16 {
    defaults::BOTTOM_INSET
}

fn default_top_inset() -> u16 {
    defaults::TOP_INSET
}

fn default_backdrop_opacity() -> f32 {
    defaults::BACKDROP_OPACITY
}

fn default_animation_frames() -> u16 {
    defaults::ANIMATION_FRAMES
}

fn default_initial_snap_index() -> usize {
    defaults::INITIAL_SNAP_INDEX
}

fn default_display_name() -> String {
    defaults::DISPLAY_NAME.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

// Default implementations
impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            platform: default_platform(),
        }
    }
}

impl Default for SheetSettings {
    fn default() -> Self {
        Self {
            nav_bar_height: default_nav_bar_height(),
            bottom_inset: default_bottom_inset(),
            top_inset: default_top_inset(),
            backdrop_opacity: default_backdrop_opacity(),
            animation_frames: default_animation_frames(),
            initial_snap_index: default_initial_snap_index(),
        }
    }
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            email: String::new(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
        }
    }
}
