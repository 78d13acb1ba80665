//! Accept/decline quest dialog rendered inside the bottom sheet.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use questboard_config::constants::MODAL_BUTTON_SPACING;
use questboard_theme::Theme;
use questboard_ui::rect_contains;

/// The player's answer to a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestDecision {
    Accept,
    Decline,
}

#[derive(Debug)]
pub struct QuestDialog {
    description: String,
    accept_text: String,
    decline_text: String,
    selected: QuestDecision,
    accept_area: Option<Rect>,
    decline_area: Option<Rect>,
}

impl QuestDialog {
    pub fn new(
        description: impl Into<String>,
        accept_text: impl Into<String>,
        decline_text: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            accept_text: accept_text.into(),
            decline_text: decline_text.into(),
            selected: QuestDecision::Accept,
            accept_area: None,
            decline_area: None,
        }
    }

    pub fn selected(&self) -> QuestDecision {
        self.selected
    }

    /// Restore the default selection for a fresh quest.
    pub fn reset(&mut self) {
        self.selected = QuestDecision::Accept;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<QuestDecision> {
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.selected = match self.selected {
                    QuestDecision::Accept => QuestDecision::Decline,
                    QuestDecision::Decline => QuestDecision::Accept,
                };
                None
            }
            KeyCode::Enter => Some(self.selected),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(QuestDecision::Accept),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(QuestDecision::Decline),
            _ => None,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<QuestDecision> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let hit = |area: Option<Rect>| area.is_some_and(|a| rect_contains(a, mouse.column, mouse.row));
        if hit(self.accept_area) {
            self.selected = QuestDecision::Accept;
            Some(QuestDecision::Accept)
        } else if hit(self.decline_area) {
            self.selected = QuestDecision::Decline;
            Some(QuestDecision::Decline)
        } else {
            None
        }
    }

    /// Buttons take the last row; the description fills what is left above.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.accept_area = None;
        self.decline_area = None;
        if area.is_empty() {
            return;
        }

        let description_area = Rect::new(area.x, area.y, area.width, area.height - 1);
        if !description_area.is_empty() {
            Paragraph::new(self.description.as_str())
                .style(Style::default().fg(theme.fg))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(description_area, buf);
        }

        let accept = format!("[ {} ]", self.accept_text);
        let decline = format!("[ {} ]", self.decline_text);
        let accept_width = accept.width() as u16;
        let decline_width = decline.width() as u16;
        let total = accept_width + MODAL_BUTTON_SPACING + decline_width;

        let button_style = |selected: bool| {
            if selected {
                Style::default()
                    .fg(theme.sheet_bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.accent)
            }
        };

        let row = area.bottom() - 1;
        let start = area.x + area.width.saturating_sub(total) / 2;
        let line = Line::from(vec![
            Span::styled(accept, button_style(self.selected == QuestDecision::Accept)),
            Span::raw(" ".repeat(MODAL_BUTTON_SPACING as usize)),
            Span::styled(decline, button_style(self.selected == QuestDecision::Decline)),
        ]);
        buf.set_line(start, row, &line, area.right().saturating_sub(start));

        let decline_x = start + accept_width + MODAL_BUTTON_SPACING;
        self.accept_area = Some(Rect::new(start, row, accept_width, 1).intersection(area));
        self.decline_area = Some(Rect::new(decline_x, row, decline_width, 1).intersection(area));
    }
}
