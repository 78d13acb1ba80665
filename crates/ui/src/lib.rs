//! UI primitives for questboard.
//!
//! Provides the generic modal trait and the rectangle helpers that dialogs,
//! the side menu, and the bottom sheet use to position themselves.

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
};

use questboard_theme::Theme;

// ===== Modal System =====

/// Modal window result (generic version).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalResult<T> {
    /// User confirmed the action with a result.
    Confirmed(T),
    /// User cancelled the action.
    Cancelled,
}

/// Trait for all modal windows.
pub trait Modal {
    /// Modal window result type.
    type Result;

    /// Render the modal window with theme.
    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Handle keyboard event.
    /// Returns Some(result) if the modal window should close.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>>;

    /// Handle mouse event.
    /// Returns Some(result) if the modal window should close.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Result<Option<ModalResult<Self::Result>>> {
        Ok(None)
    }
}

// ===== Modal Width Calculation =====

/// Default modal size constants.
pub mod modal_constants {
    /// Minimum modal width.
    pub const MIN_WIDTH: u16 = 30;
    /// Maximum width as percentage of screen.
    pub const MAX_WIDTH_PERCENTAGE: f32 = 0.75;
    /// Padding with single border.
    pub const PADDING_WITH_BORDER: u16 = 6;
}

/// Calculate modal width based on content and screen constraints.
///
/// Takes the widest content, adds border padding, then clamps to the
/// minimum width and a percentage of the screen.
pub fn calculate_modal_width(content_widths: impl Iterator<Item = u16>, screen_width: u16) -> u16 {
    let content_width = content_widths.max().unwrap_or(0);
    let total_width = content_width + modal_constants::PADDING_WITH_BORDER;
    let max_width = (screen_width as f32 * modal_constants::MAX_WIDTH_PERCENTAGE) as u16;

    total_width
        .max(modal_constants::MIN_WIDTH)
        .min(max_width)
        .min(screen_width)
}

// ===== Rect helpers =====

/// Create a centered rectangle with specified width and height within a container.
pub fn centered_rect_with_size(width: u16, height: u16, r: Rect) -> Rect {
    let horizontal_margin = r.width.saturating_sub(width) / 2;
    let vertical_margin = r.height.saturating_sub(height) / 2;

    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_margin),
            Constraint::Length(height),
            Constraint::Length(vertical_margin),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(horizontal_margin),
            Constraint::Length(width),
            Constraint::Length(horizontal_margin),
        ])
        .split(vertical_layout[1])[1]
}

/// Full-width rect of `height` rows whose bottom edge sits `bottom_offset`
/// rows above the bottom of `r`.
///
/// Both values are clamped so the result never leaves the container.
pub fn bottom_anchored_rect(height: u16, bottom_offset: u16, r: Rect) -> Rect {
    let bottom_offset = bottom_offset.min(r.height);
    let height = height.min(r.height - bottom_offset);
    let y = r.y + r.height - bottom_offset - height;
    Rect::new(r.x, y, r.width, height)
}

/// Create a rect with margin.
pub fn with_margin(rect: Rect, horizontal: u16, vertical: u16) -> Rect {
    Rect::new(
        rect.x.saturating_add(horizontal),
        rect.y.saturating_add(vertical),
        rect.width.saturating_sub(horizontal * 2),
        rect.height.saturating_sub(vertical * 2),
    )
}

/// Calculate percentage of a value.
pub fn percentage(value: u16, percent: u16) -> u16 {
    (value as u32 * percent as u32 / 100) as u16
}

/// Hit test for mouse coordinates.
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}
