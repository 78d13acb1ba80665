//! Quest screen for questboard.
//!
//! The screen hosts the bottom sheet: it owns the visibility flag, slots the
//! quest dialog into the sheet, and routes input between the header, the side
//! menu, the inbox dialog, and the sheet.

pub mod header;
pub mod message_modal;
pub mod profile;
pub mod quest_dialog;
pub mod side_menu;

pub use header::{Header, HeaderButton};
pub use message_modal::{Message, MessageModal};
pub use profile::UserProfile;
pub use quest_dialog::{QuestDecision, QuestDialog};
pub use side_menu::{MenuAction, SideMenu};

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph, Widget},
};

use questboard_config::Config;
use questboard_logger as logger;
use questboard_sheet::{
    BackdropConfig, PanelController, Platform, PresentationState, SafeAreaInsets, SheetOverlay,
    SheetProps, TerminalViewport,
};
use questboard_theme::Theme;
use questboard_ui::{Modal, ModalResult};

const QUEST_DESCRIPTION: &str = "Embark on a journey to master your strength and agility. \
                                 Are you ready to accept this challenge?";

/// Outcome of routing one input event through the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Consumed; redraw.
    Handled,
    Ignored,
    Quit,
    Logout,
}

pub struct QuestScreen {
    theme: &'static Theme,
    profile: UserProfile,
    viewport: TerminalViewport,
    sheet: PanelController<SheetOverlay>,
    animation_frames: u16,
    quest: QuestDialog,
    header: Header,
    menu: SideMenu,
    messages: Option<MessageModal>,
}

impl QuestScreen {
    pub fn new(config: &Config, width: u16, height: u16) -> Self {
        let platform = Platform::from_str(&config.general.platform).unwrap_or_else(|e| {
            logger::warn(format!("{}, detecting platform instead", e));
            Platform::detect()
        });
        let insets = SafeAreaInsets {
            top: config.sheet.top_inset,
            bottom: config.sheet.bottom_inset,
        };
        let props = SheetProps {
            is_visible: true,
            initial_snap_index: config.sheet.initial_snap_index,
            on_request_close: None,
        };
        let sheet = PanelController::new(
            props,
            config.sheet.nav_bar_height,
            platform.inset_policy(),
        )
        .with_backdrop(BackdropConfig::default().with_opacity(config.sheet.backdrop_opacity));

        let mut screen = Self {
            theme: Theme::get_by_name(&config.general.theme),
            profile: UserProfile::from_settings(&config.user),
            viewport: TerminalViewport::with_size(width, height, insets),
            sheet,
            animation_frames: config.sheet.animation_frames,
            quest: QuestDialog::new(QUEST_DESCRIPTION, "ACCEPT", "DECLINE"),
            header: Header::new(),
            menu: SideMenu::new(width),
            messages: None,
        };
        logger::info(format!("Quest screen using {:?} inset policy", platform));
        screen.mount_sheet();
        screen
    }

    fn mount_sheet(&mut self) {
        match self.sheet.actuator_config(&self.viewport) {
            Ok(config) => {
                logger::debug(format!("Mounting sheet with {:?}", config.snap_points));
                self.sheet
                    .mount(SheetOverlay::new(config, self.animation_frames));
            }
            Err(e) => logger::warn(format!("Bottom sheet not mounted: {}", e)),
        }
    }

    /// The host-owned visibility flag the sheet is slaved to.
    pub fn sheet_visible(&self) -> bool {
        self.sheet.is_visible()
    }

    pub fn sheet_state(&self) -> Option<PresentationState> {
        self.sheet.handle().with(|overlay| overlay.state())
    }

    pub fn menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn inbox_open(&self) -> bool {
        self.messages.is_some()
    }

    pub fn set_sheet_visible(&mut self, visible: bool) {
        if visible {
            self.quest.reset();
        }
        self.sheet.set_visible(visible);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.sheet.invalidate_layout();
        self.menu.resize(width);
        if self.sheet.is_mounted() {
            if let Err(e) = self.sheet.sync_layout(&self.viewport) {
                logger::warn(format!("Keeping previous sheet layout: {}", e));
            }
        } else {
            self.mount_sheet();
        }
    }

    /// Advance animations. Returns true when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let sheet = self
            .sheet
            .handle()
            .with_mut(|overlay| overlay.tick())
            .unwrap_or(false);
        let menu = self.menu.tick();
        sheet || menu
    }

    fn decide(&mut self, decision: QuestDecision) {
        match decision {
            QuestDecision::Accept => logger::info("Quest accepted"),
            QuestDecision::Decline => logger::info("Quest declined"),
        }
        self.set_sheet_visible(false);
    }

    fn open_inbox(&mut self) {
        self.messages = Some(MessageModal::new(vec![
            Message::new("Guild Master", "Your next trial awaits"),
            Message::new("Coach", "Rest day tomorrow"),
            Message::new("System", "Welcome to Questboard"),
        ]));
    }

    fn apply_menu_action(&mut self, action: MenuAction) -> ScreenEvent {
        self.menu.toggle();
        match action {
            MenuAction::Close => ScreenEvent::Handled,
            MenuAction::Logout => {
                logger::info(format!("{} logged out", self.profile.display_name));
                ScreenEvent::Logout
            }
        }
    }

    fn sheet_presented(&self) -> bool {
        self.sheet_state() == Some(PresentationState::Presented)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return ScreenEvent::Quit;
        }

        if let Some(inbox) = self.messages.as_mut() {
            match inbox.handle_key(key) {
                Ok(Some(ModalResult::Confirmed(Some(message)))) => {
                    logger::info(format!("Opened message from {}", message.from));
                    self.messages = None;
                }
                Ok(Some(_)) => self.messages = None,
                Ok(None) => {}
                Err(e) => logger::error(format!("Inbox key handling failed: {}", e)),
            }
            return ScreenEvent::Handled;
        }

        if self.menu.is_open() {
            return match self.menu.handle_key(key) {
                Some(action) => self.apply_menu_action(action),
                None => ScreenEvent::Ignored,
            };
        }

        let dragged = self
            .sheet
            .handle()
            .with_mut(|overlay| overlay.handle_key(key))
            .unwrap_or(false);
        if dragged {
            return ScreenEvent::Handled;
        }

        if self.sheet_presented() {
            if let Some(decision) = self.quest.handle_key(key) {
                self.decide(decision);
                return ScreenEvent::Handled;
            }
            if matches!(key.code, KeyCode::Left | KeyCode::Right | KeyCode::Tab) {
                return ScreenEvent::Handled;
            }
        }

        match key.code {
            KeyCode::Char('q') => ScreenEvent::Quit,
            KeyCode::Char('m') => {
                self.menu.toggle();
                ScreenEvent::Handled
            }
            KeyCode::Char('i') => {
                self.open_inbox();
                ScreenEvent::Handled
            }
            KeyCode::Char('n') if !self.sheet.is_visible() => {
                self.set_sheet_visible(true);
                ScreenEvent::Handled
            }
            _ => ScreenEvent::Ignored,
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> ScreenEvent {
        if let Some(inbox) = self.messages.as_mut() {
            if let Ok(Some(_)) = inbox.handle_mouse(mouse) {
                self.messages = None;
            }
            return ScreenEvent::Handled;
        }

        if self.menu.is_open() {
            return match self.menu.handle_mouse(mouse) {
                Some(action) => self.apply_menu_action(action),
                None => ScreenEvent::Ignored,
            };
        }

        let consumed = self
            .sheet
            .handle()
            .with_mut(|overlay| overlay.handle_mouse(mouse))
            .unwrap_or(false);
        if consumed {
            return ScreenEvent::Handled;
        }

        if self.sheet_presented() {
            if let Some(decision) = self.quest.handle_mouse(mouse) {
                self.decide(decision);
                return ScreenEvent::Handled;
            }
        }

        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return ScreenEvent::Ignored;
        }
        match self.header.hit(mouse.column, mouse.row) {
            Some(HeaderButton::Mail) => {
                self.open_inbox();
                ScreenEvent::Handled
            }
            Some(HeaderButton::Menu) => {
                self.menu.toggle();
                ScreenEvent::Handled
            }
            None => ScreenEvent::Ignored,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        Block::default()
            .style(Style::default().bg(theme.bg).fg(theme.fg))
            .render(area, buf);

        self.header.render(area, buf, theme);

        let title_y = area.y + area.height / 3;
        if title_y < area.bottom() {
            Paragraph::new("Quest Screen")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))
                .render(Rect::new(area.x, title_y, area.width, 1), buf);
        }

        self.menu.render(area, buf, theme, &self.profile);

        let quest = &mut self.quest;
        self.sheet.handle().with_mut(|overlay| {
            overlay.render(area, buf, theme, |content, buf| {
                quest.render(content, buf, theme)
            })
        });

        if let Some(inbox) = self.messages.as_mut() {
            inbox.render(area, buf, theme);
        }
    }
}
