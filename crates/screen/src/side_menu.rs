//! Slide-out side menu.
//!
//! The menu sits against the right edge and is translated horizontally:
//! an offset equal to its width is fully closed, 0 is fully open. Each tick
//! closes a fraction of the remaining distance.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use questboard_config::constants::MENU_WIDTH_PERCENT;
use questboard_sheet::DimBackdrop;
use questboard_theme::Theme;
use questboard_ui::{percentage, rect_contains};

use crate::profile::UserProfile;

/// Share of the remaining distance covered per tick, in percent.
const SLIDE_STEP_PERCENT: u32 = 40;
const OVERLAY_OPACITY: f32 = 0.5;

/// What the menu wants the screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Close,
    Logout,
}

#[derive(Debug)]
pub struct SideMenu {
    open: bool,
    width: u16,
    offset: u16,
    logout_area: Option<Rect>,
    menu_area: Option<Rect>,
}

impl SideMenu {
    pub fn new(screen_width: u16) -> Self {
        let width = percentage(screen_width, MENU_WIDTH_PERCENT);
        Self {
            open: false,
            width,
            offset: width,
            logout_area: None,
            menu_area: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Recompute width for a new screen size, snapping the animation.
    pub fn resize(&mut self, screen_width: u16) {
        self.width = percentage(screen_width, MENU_WIDTH_PERCENT);
        self.offset = if self.open { 0 } else { self.width };
    }

    fn target(&self) -> u16 {
        if self.open {
            0
        } else {
            self.width
        }
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.target()
    }

    /// Advance the slide. Returns true when the offset moved.
    pub fn tick(&mut self) -> bool {
        let target = self.target();
        if self.offset == target {
            return false;
        }
        let distance = u32::from(self.offset.abs_diff(target));
        let step = (distance * SLIDE_STEP_PERCENT / 100).max(1) as u16;
        self.offset = if self.offset > target {
            self.offset - step
        } else {
            self.offset + step
        };
        true
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<MenuAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => Some(MenuAction::Close),
            KeyCode::Enter | KeyCode::Char('l') => Some(MenuAction::Logout),
            _ => None,
        }
    }

    /// Clicking the overlay closes the menu, clicking Logout logs out.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<MenuAction> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        if self
            .logout_area
            .is_some_and(|area| rect_contains(area, mouse.column, mouse.row))
        {
            return Some(MenuAction::Logout);
        }
        match self.menu_area {
            Some(area) if rect_contains(area, mouse.column, mouse.row) => None,
            _ => Some(MenuAction::Close),
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme, profile: &UserProfile) {
        self.logout_area = None;
        self.menu_area = None;

        let width = self.width.min(area.width);
        let visible = width.saturating_sub(self.offset);
        if visible == 0 {
            return;
        }

        if self.open {
            DimBackdrop::new(OVERLAY_OPACITY, theme.backdrop).render(area, buf);
        }

        // Draw the whole menu off-screen, then copy the columns that have slid in.
        let scratch_area = Rect::new(0, 0, width, area.height);
        let mut scratch = Buffer::empty(scratch_area);
        let logout_row = render_menu(scratch_area, &mut scratch, theme, profile);

        let x = area.right() - visible;
        for dy in 0..area.height {
            for dx in 0..visible {
                buf[(x + dx, area.y + dy)] = scratch[(dx, dy)].clone();
            }
        }

        self.menu_area = Some(Rect::new(x, area.y, visible, area.height));
        if let Some(row) = logout_row {
            self.logout_area = Some(Rect::new(x, area.y + row, visible, 1));
        }
    }
}

/// Returns the row of the Logout item, if it fits.
fn render_menu(area: Rect, buf: &mut Buffer, theme: &Theme, profile: &UserProfile) -> Option<u16> {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(Style::default().fg(theme.muted))
        .style(Style::default().bg(theme.bg).fg(theme.accent));
    let inner = block.inner(area);
    block.render(area, buf);

    let x = inner.x + 2;
    let max_width = inner.width.saturating_sub(2);
    let lines: [(&str, Style); 3] = [
        (
            profile.display_name.as_str(),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        (profile.email.as_str(), Style::default().fg(theme.muted)),
        ("", Style::default()),
    ];

    let mut y = inner.y + 2;
    buf.set_stringn(x, y, "◉", max_width as usize, Style::default().fg(theme.accent));
    for (text, style) in lines {
        if y >= inner.bottom() {
            return None;
        }
        buf.set_stringn(x + 2, y, text, max_width.saturating_sub(2) as usize, style);
        y += 1;
    }

    if y < inner.bottom() {
        let separator = "─".repeat(max_width as usize);
        buf.set_string(x, y, separator, Style::default().fg(theme.muted));
        y += 2;
    }
    if y >= inner.bottom() {
        return None;
    }
    buf.set_stringn(x, y, "⏻ Logout", max_width as usize, Style::default().fg(theme.accent));
    Some(y)
}
