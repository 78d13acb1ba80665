//! Theme system for questboard.
//!
//! Provides color theme management with support for custom TOML themes.

mod colors;
mod loader;

pub use colors::Theme;
pub use loader::load_theme;

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

// Embed theme files at compile time
const THEME_NEON_TOML: &str = include_str!("../themes/neon.toml");
const THEME_MIDNIGHT_TOML: &str = include_str!("../themes/midnight.toml");

static THEME_NEON: OnceLock<Theme> = OnceLock::new();
static THEME_MIDNIGHT: OnceLock<Theme> = OnceLock::new();

// Cache for user-loaded themes
static USER_THEMES: OnceLock<Mutex<HashMap<String, &'static Theme>>> = OnceLock::new();

// Themes directory path (set by app on startup)
static THEMES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Set the themes directory path (call this at app startup).
pub fn set_themes_dir(path: PathBuf) {
    let _ = THEMES_DIR.set(path);
}

/// Hardcoded fallback theme in case of parse errors.
fn get_hardcoded_fallback_theme(name: &'static str) -> Theme {
    Theme {
        name,
        bg: Color::Black,
        fg: Color::White,
        accent: Color::LightMagenta,
        sheet_bg: Color::Black,
        handle: Color::LightMagenta,
        backdrop: Color::Black,
        muted: Color::DarkGray,
        success: Color::Green,
        error: Color::Red,
    }
}

fn load_theme_from_toml(content: &str, name: &'static str) -> Theme {
    match loader::load_theme_from_str(content, name) {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!(
                "Failed to parse built-in theme '{}': {}. Using fallback theme.",
                name, e
            );
            get_hardcoded_fallback_theme(name)
        }
    }
}

fn get_neon_theme() -> &'static Theme {
    THEME_NEON.get_or_init(|| load_theme_from_toml(THEME_NEON_TOML, "neon"))
}

fn get_midnight_theme() -> &'static Theme {
    THEME_MIDNIGHT.get_or_init(|| load_theme_from_toml(THEME_MIDNIGHT_TOML, "midnight"))
}

/// Try to load user theme from config directory.
fn try_load_user_theme(name: &str) -> Option<&'static Theme> {
    let cache = USER_THEMES.get_or_init(|| Mutex::new(HashMap::new()));

    {
        let cache_lock = cache.lock().ok()?;
        if let Some(theme) = cache_lock.get(name) {
            return Some(*theme);
        }
    }

    let theme_path = THEMES_DIR.get()?.join(format!("{}.toml", name));
    if !theme_path.exists() {
        return None;
    }

    let theme = load_theme(&theme_path).ok()?;
    let static_theme: &'static Theme = Box::leak(Box::new(theme));

    if let Ok(mut cache_lock) = cache.lock() {
        cache_lock.insert(name.to_string(), static_theme);
    }

    Some(static_theme)
}

impl Theme {
    /// Get theme by name.
    ///
    /// User themes shadow built-in ones; unknown names fall back to `neon`.
    pub fn get_by_name(name: &str) -> &'static Theme {
        if let Some(theme) = try_load_user_theme(name) {
            return theme;
        }

        match name {
            "midnight" => get_midnight_theme(),
            _ => get_neon_theme(),
        }
    }

    /// Get list of all theme names.
    pub fn all_theme_names() -> &'static [&'static str] {
        &["midnight", "neon"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_parse() {
        let neon = Theme::get_by_name("neon");
        assert_eq!(neon.name, "neon");
        assert_eq!(neon.accent, Color::Rgb(0xd8, 0xb4, 0xfe));

        let midnight = Theme::get_by_name("midnight");
        assert_eq!(midnight.name, "midnight");
        assert_eq!(midnight.sheet_bg, Color::Rgb(20, 24, 44));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_neon() {
        assert_eq!(Theme::get_by_name("nonexistent").name, "neon");
        assert_eq!(Theme::default().name, "neon");
    }
}
