//! Mail inbox dialog.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use questboard_theme::Theme;
use questboard_ui::{calculate_modal_width, centered_rect_with_size, rect_contains, Modal, ModalResult};

/// One inbox entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub from: String,
    pub subject: String,
}

impl Message {
    pub fn new(from: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            subject: subject.into(),
        }
    }

    fn line(&self) -> String {
        format!("{}: {}", self.from, self.subject)
    }
}

#[derive(Debug)]
pub struct MessageModal {
    messages: Vec<Message>,
    selected: usize,
    close_button_area: Option<Rect>,
}

impl MessageModal {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            selected: 0,
            close_button_area: None,
        }
    }

    pub fn selected(&self) -> Option<&Message> {
        self.messages.get(self.selected)
    }

    fn modal_width(&self, screen_width: u16) -> u16 {
        let widest = self
            .messages
            .iter()
            .map(|m| m.line().width() as u16 + 2)
            .chain(std::iter::once(" [X] Inbox ".width() as u16));
        calculate_modal_width(widest, screen_width)
    }
}

impl Modal for MessageModal {
    /// The message the user opened, if any.
    type Result = Option<Message>;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let rows = self.messages.len().max(1) as u16;
        let modal_area = centered_rect_with_size(self.modal_width(area.width), rows + 2, area);

        Clear.render(modal_area, buf);
        let block = Block::default()
            .title(Span::styled(
                " [X] Inbox ",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg).fg(theme.fg));
        let inner = block.inner(modal_area);
        block.render(modal_area, buf);

        self.close_button_area = Some(Rect::new(modal_area.x + 2, modal_area.y, 3, 1));

        if self.messages.is_empty() {
            buf.set_stringn(
                inner.x + 1,
                inner.y,
                "No new messages",
                inner.width.saturating_sub(1) as usize,
                Style::default().fg(theme.muted),
            );
            return;
        }

        for (i, message) in self.messages.iter().enumerate().take(inner.height as usize) {
            let style = if i == self.selected {
                Style::default()
                    .fg(theme.bg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg)
            };
            buf.set_stringn(
                inner.x + 1,
                inner.y + i as u16,
                message.line(),
                inner.width.saturating_sub(1) as usize,
                style,
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<ModalResult<Self::Result>>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.messages.len() {
                    self.selected += 1;
                }
                Ok(None)
            }
            KeyCode::Enter => Ok(Some(ModalResult::Confirmed(self.selected().cloned()))),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('i') => {
                Ok(Some(ModalResult::Cancelled))
            }
            _ => Ok(None),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<ModalResult<Self::Result>>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        match self.close_button_area {
            Some(area) if rect_contains(area, mouse.column, mouse.row) => {
                Ok(Some(ModalResult::Cancelled))
            }
            _ => Ok(None),
        }
    }
}
