//! Theme color definitions.

use ratatui::style::Color;

/// Application theme with semantic color assignments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name for display
    pub name: &'static str,

    // === Base ===
    /// Screen background
    pub bg: Color,
    /// Main text
    pub fg: Color,
    /// Buttons, icons, borders, titles
    pub accent: Color,

    // === Sheet ===
    /// Bottom sheet surface
    pub sheet_bg: Color,
    /// Drag indicator on the sheet handle
    pub handle: Color,
    /// Color the backdrop dims towards
    pub backdrop: Color,

    // === Secondary ===
    /// Secondary text, separators
    pub muted: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        *Self::get_by_name("neon")
    }
}
