//! Screen header with the mail and menu buttons.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use questboard_config::constants::HEADER_HEIGHT;
use questboard_theme::Theme;

const MAIL_LABEL: &str = "[✉]";
const MENU_LABEL: &str = "[☰]";
const BUTTON_WIDTH: u16 = 3;
const HORIZONTAL_PADDING: u16 = 2;

/// Button under a header click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderButton {
    Mail,
    Menu,
}

#[derive(Debug, Default)]
pub struct Header {
    mail_area: Option<Rect>,
    menu_area: Option<Rect>,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of `area` the header occupies.
    pub fn area(area: Rect) -> Rect {
        Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height))
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let header = Self::area(area);
        self.mail_area = None;
        self.menu_area = None;
        if header.height < 2 || header.width < (BUTTON_WIDTH + HORIZONTAL_PADDING) * 2 {
            return;
        }

        let row = header.y + 1;
        let style = Style::default().fg(theme.accent);
        let mail_x = header.x + HORIZONTAL_PADDING;
        let menu_x = header.right() - HORIZONTAL_PADDING - BUTTON_WIDTH;
        buf.set_string(mail_x, row, MAIL_LABEL, style);
        buf.set_string(menu_x, row, MENU_LABEL, style);

        self.mail_area = Some(Rect::new(mail_x, row, BUTTON_WIDTH, 1));
        self.menu_area = Some(Rect::new(menu_x, row, BUTTON_WIDTH, 1));
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<HeaderButton> {
        let inside = |area: Option<Rect>| {
            area.is_some_and(|a| questboard_ui::rect_contains(a, column, row))
        };
        if inside(self.mail_area) {
            Some(HeaderButton::Mail)
        } else if inside(self.menu_area) {
            Some(HeaderButton::Menu)
        } else {
            None
        }
    }
}
