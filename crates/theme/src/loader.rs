//! Theme loading from TOML files.

use anyhow::{anyhow, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::path::Path;

use crate::Theme;

/// Color representation in TOML: a name, a `#rrggbb` string, or `{ rgb = [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_color(&self) -> Result<Color> {
        match self {
            TomlColor::Named(name) if name.starts_with('#') => parse_hex(name),
            TomlColor::Named(name) => Ok(match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                _ => Color::White,
            }),
            TomlColor::Rgb { rgb } => Ok(Color::Rgb(rgb[0], rgb[1], rgb[2])),
        }
    }
}

fn parse_hex(value: &str) -> Result<Color> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(anyhow!("Invalid hex color: {}", value));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| anyhow!("Invalid hex color: {}", value))
    };
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Debug, Clone, Deserialize)]
struct TomlColors {
    bg: TomlColor,
    fg: TomlColor,
    accent: TomlColor,
    sheet_bg: TomlColor,
    handle: TomlColor,
    backdrop: TomlColor,
    muted: TomlColor,
    success: TomlColor,
    error: TomlColor,
}

#[derive(Debug, Clone, Deserialize)]
struct TomlTheme {
    name: String,
    colors: TomlColors,
}

impl TomlTheme {
    fn into_theme(self, name: &'static str) -> Result<Theme> {
        let c = &self.colors;
        Ok(Theme {
            name,
            bg: c.bg.to_color()?,
            fg: c.fg.to_color()?,
            accent: c.accent.to_color()?,
            sheet_bg: c.sheet_bg.to_color()?,
            handle: c.handle.to_color()?,
            backdrop: c.backdrop.to_color()?,
            muted: c.muted.to_color()?,
            success: c.success.to_color()?,
            error: c.error.to_color()?,
        })
    }
}

/// Load theme from TOML file.
///
/// Returns the parsed theme with a leaked static name string.
pub fn load_theme(path: &Path) -> Result<Theme> {
    let content = std::fs::read_to_string(path)?;
    let toml_theme: TomlTheme = toml::from_str(&content)?;

    // Leak the name string to get 'static lifetime
    let name: &'static str = Box::leak(toml_theme.name.clone().into_boxed_str());
    toml_theme.into_theme(name)
}

/// Load theme from TOML string with a static name.
pub fn load_theme_from_str(content: &str, name: &'static str) -> Result<Theme> {
    let toml_theme: TomlTheme = toml::from_str(content)?;
    toml_theme.into_theme(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
name = "sample"

[colors]
bg = "#000000"
fg = "White"
accent = "#d8b4fe"
sheet_bg = { rgb = [1, 2, 3] }
handle = "Cyan"
backdrop = "Black"
muted = "DarkGray"
success = "Green"
error = "Red"
"##;

    #[test]
    fn test_hex_named_and_rgb_colors() {
        let theme = load_theme_from_str(SAMPLE, "sample").unwrap();
        assert_eq!(theme.accent, Color::Rgb(0xd8, 0xb4, 0xfe));
        assert_eq!(theme.fg, Color::White);
        assert_eq!(theme.sheet_bg, Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        let broken = SAMPLE.replace("#d8b4fe", "#d8b4");
        assert!(load_theme_from_str(&broken, "broken").is_err());
    }

    #[test]
    fn test_load_theme_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let theme = load_theme(&path).unwrap();
        assert_eq!(theme.name, "sample");
    }
}
