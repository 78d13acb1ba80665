//! Dimming layer rendered behind the sheet.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

/// What a press on the backdrop does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressBehavior {
    /// Swallow the press.
    None,
    /// Collapse the sheet to its smallest snap point.
    Collapse,
    /// Dismiss the sheet.
    Close,
}

/// Outcome of a backdrop press, for the actuator to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropAction {
    None,
    Collapse,
    Close,
}

/// Backdrop visibility and interaction policy.
///
/// `animated_index` runs from `-1.0` (closed) through `0.0` (smallest snap
/// point) upwards; opacity ramps linearly between the two configured indexes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropConfig {
    pub appears_on_index: i32,
    pub disappears_on_index: i32,
    pub opacity: f32,
    pub press_behavior: PressBehavior,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            appears_on_index: 0,
            disappears_on_index: -1,
            opacity: 0.5,
            press_behavior: PressBehavior::None,
        }
    }
}

impl BackdropConfig {
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Opacity for the current animated index.
    pub fn opacity_at(&self, animated_index: f32) -> f32 {
        let from = self.disappears_on_index as f32;
        let to = self.appears_on_index as f32;
        if to <= from {
            return if animated_index >= to { self.opacity } else { 0.0 };
        }
        let t = ((animated_index - from) / (to - from)).clamp(0.0, 1.0);
        t * self.opacity
    }

    pub fn press(&self) -> BackdropAction {
        self.press_behavior.into()
    }
}

impl From<PressBehavior> for BackdropAction {
    fn from(behavior: PressBehavior) -> Self {
        match behavior {
            PressBehavior::None => BackdropAction::None,
            PressBehavior::Collapse => BackdropAction::Collapse,
            PressBehavior::Close => BackdropAction::Close,
        }
    }
}

/// Values the actuator hands to the backdrop factory on every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropProps {
    pub animated_index: f32,
    pub tint: Color,
}

/// Darkens every cell in its area towards `tint`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimBackdrop {
    pub opacity: f32,
    pub tint: Color,
}

impl DimBackdrop {
    pub fn new(opacity: f32, tint: Color) -> Self {
        Self { opacity, tint }
    }
}

impl Widget for DimBackdrop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity <= 0.0 {
            return;
        }
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = &mut buf[(x, y)];
                let fg = blend(cell.fg, self.tint, self.opacity, Color::DarkGray);
                let bg = blend(cell.bg, self.tint, self.opacity, self.tint);
                cell.set_fg(fg);
                cell.set_bg(bg);
            }
        }
    }
}

/// Mix `color` towards `tint`. Non-RGB colors cannot be mixed, so they switch
/// to `fallback` once the backdrop is at least a quarter opaque.
fn blend(color: Color, tint: Color, opacity: f32, fallback: Color) -> Color {
    match (color, tint) {
        (Color::Rgb(r, g, b), Color::Rgb(tr, tg, tb)) => {
            let mix = |c: u8, t: u8| (f32::from(c) + (f32::from(t) - f32::from(c)) * opacity) as u8;
            Color::Rgb(mix(r, tr), mix(g, tg), mix(b, tb))
        }
        _ if opacity >= 0.25 => fallback,
        _ => color,
    }
}
