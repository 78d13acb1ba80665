//! Terminal bottom sheet actuator.
//!
//! `SheetOverlay` owns the presentation state machine, the open/close
//! animation, drag handling between snap points, backdrop rendering, and
//! keyboard avoidance.
//!
//! ```text
//!           present()                 tick()...
//! Hidden ─────────────► Presenting ─────────────► Presented ◄─┐
//!   ▲                                                 │       │ snap_up / snap_down
//!   │        tick()...                  dismiss()     │───────┘
//!   └────────────────── Dismissing ◄──────────────────┘
//! ```

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use questboard_logger as logger;
use questboard_theme::Theme;
use questboard_ui::{bottom_anchored_rect, rect_contains};

use crate::actuator::{ActuatorConfig, PanelActuator};
use crate::backdrop::{BackdropAction, BackdropProps};
use crate::error::Result;
use crate::inset::KeyboardMode;
use crate::snap::SnapPoints;

/// Rows at the top of the sheet that start a drag (border + indicator).
const HANDLE_ROWS: u16 = 2;
/// Width of the drag indicator.
const INDICATOR_WIDTH: u16 = 6;
/// Extra rows a drag may overshoot the largest snap point when over-drag is on.
const OVER_DRAG_ROWS: u16 = 2;
/// Horizontal content padding.
const CONTENT_PADDING_X: u16 = 2;
/// Bottom content padding.
const CONTENT_PADDING_BOTTOM: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Hidden,
    Presenting,
    Presented,
    Dismissing,
}

#[derive(Debug)]
pub struct SheetOverlay {
    config: ActuatorConfig,
    state: PresentationState,
    snap_index: usize,
    /// Animation progress in frames, `0..=animation_frames`.
    progress: u16,
    animation_frames: u16,
    keyboard_height: u16,
    /// Live sheet height while the handle is dragged.
    drag_height: Option<u16>,
    sheet_area: Option<Rect>,
}

impl SheetOverlay {
    pub fn new(config: ActuatorConfig, animation_frames: u16) -> Self {
        if config.enable_dynamic_sizing {
            logger::warn("Dynamic sheet sizing is not supported, using fixed snap points");
        }
        let snap_index = config.snap_points.clamp_index(config.initial_index);
        Self {
            config,
            state: PresentationState::Hidden,
            snap_index,
            progress: 0,
            animation_frames,
            keyboard_height: 0,
            drag_height: None,
            sheet_area: None,
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn snap_index(&self) -> usize {
        self.snap_index
    }

    pub fn snap_points(&self) -> SnapPoints {
        self.config.snap_points
    }

    /// Anything other than `Hidden`.
    pub fn is_open(&self) -> bool {
        self.state != PresentationState::Hidden
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_height.is_some()
    }

    /// Area the sheet occupied on the last render.
    pub fn sheet_area(&self) -> Option<Rect> {
        self.sheet_area
    }

    fn target_height(&self) -> u16 {
        self.drag_height.unwrap_or_else(|| {
            self.config
                .snap_points
                .get(self.snap_index)
                .unwrap_or(self.config.snap_points.min())
        })
    }

    /// Sheet height for the current animation frame.
    pub fn current_height(&self) -> u16 {
        let target = self.target_height();
        match self.state {
            PresentationState::Hidden => 0,
            PresentationState::Presented => target,
            PresentationState::Presenting | PresentationState::Dismissing => {
                let frames = u32::from(self.animation_frames.max(1));
                (u32::from(target) * u32::from(self.progress) / frames) as u16
            }
        }
    }

    /// Position on the `-1.0` (closed) .. `snap index` scale fed to the backdrop.
    pub fn animated_index(&self) -> f32 {
        match self.state {
            PresentationState::Hidden => -1.0,
            PresentationState::Presented => match self.drag_height {
                Some(height) => {
                    let points = self.config.snap_points;
                    let span = f32::from(points.max() - points.min());
                    (f32::from(height) - f32::from(points.min())) / span
                }
                None => self.snap_index as f32,
            },
            PresentationState::Presenting | PresentationState::Dismissing => {
                let t = f32::from(self.progress) / f32::from(self.animation_frames.max(1));
                -1.0 + (self.snap_index as f32 + 1.0) * t
            }
        }
    }

    /// Advance the animation one frame. Returns true when a redraw is needed.
    pub fn tick(&mut self) -> bool {
        match self.state {
            PresentationState::Presenting => {
                self.progress = self.progress.saturating_add(1);
                if self.progress >= self.animation_frames {
                    self.finish_present();
                }
                true
            }
            PresentationState::Dismissing => {
                self.progress = self.progress.saturating_sub(1);
                if self.progress == 0 {
                    self.finish_dismiss();
                }
                true
            }
            PresentationState::Hidden | PresentationState::Presented => false,
        }
    }

    fn finish_present(&mut self) {
        self.state = PresentationState::Presented;
        self.progress = self.animation_frames;
        (self.config.on_index_change)(self.snap_index as i32);
    }

    fn finish_dismiss(&mut self) {
        self.state = PresentationState::Hidden;
        self.progress = 0;
        self.drag_height = None;
        self.sheet_area = None;
        (self.config.on_index_change)(-1);
    }

    /// Move to a snap index, clamped to the valid range.
    ///
    /// Only a settled sheet moves; returns true when the index changed.
    pub fn snap_to(&mut self, index: usize) -> bool {
        if self.state != PresentationState::Presented {
            return false;
        }
        let index = self.config.snap_points.clamp_index(index);
        if index == self.snap_index {
            return false;
        }
        self.snap_index = index;
        (self.config.on_index_change)(index as i32);
        true
    }

    /// Never past the largest snap point.
    pub fn snap_up(&mut self) -> bool {
        self.snap_to(self.snap_index + 1)
    }

    /// At the smallest snap point this closes the sheet only when
    /// pan-down-to-close is enabled.
    pub fn snap_down(&mut self) -> bool {
        if self.snap_index == 0 {
            if self.config.enable_pan_down_to_close && self.state == PresentationState::Presented
            {
                let _ = self.dismiss();
                return true;
            }
            return false;
        }
        self.snap_to(self.snap_index - 1)
    }

    /// Report the rows covered by an on-screen keyboard.
    pub fn set_keyboard_height(&mut self, rows: u16) {
        self.keyboard_height = rows;
    }

    fn keyboard_lift(&self) -> u16 {
        match self.config.keyboard_mode {
            KeyboardMode::AdjustResize => self.keyboard_height,
            KeyboardMode::NotApplicable => 0,
        }
    }

    /// Apply the configured backdrop press behavior.
    pub fn press_backdrop(&mut self) -> BackdropAction {
        let action = BackdropAction::from(self.config.backdrop_press);
        match action {
            BackdropAction::None => {}
            BackdropAction::Collapse => {
                self.snap_to(0);
            }
            BackdropAction::Close => {
                let _ = self.dismiss();
            }
        }
        action
    }

    /// Drag keys. Returns true when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.state != PresentationState::Presented {
            return false;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::PageUp => {
                self.snap_up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::PageDown => {
                self.snap_down();
                true
            }
            _ => false,
        }
    }

    /// Backdrop presses and handle drags. Returns true when consumed; clicks
    /// inside the sheet body are left to the content.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let Some(sheet) = self.sheet_area else {
            return false;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !rect_contains(sheet, mouse.column, mouse.row) {
                    self.press_backdrop();
                    return true;
                }
                let handle_rows = sheet.y..sheet.y.saturating_add(HANDLE_ROWS);
                if self.state == PresentationState::Presented && handle_rows.contains(&mouse.row)
                {
                    self.drag_height = Some(self.target_height());
                    return true;
                }
                false
            }
            MouseEventKind::Drag(MouseButton::Left) if self.drag_height.is_some() => {
                let height = sheet.bottom().saturating_sub(mouse.row);
                self.drag_height = Some(self.clamp_drag_height(height));
                true
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag_height.take() {
                Some(height) => {
                    let points = self.config.snap_points;
                    if self.config.enable_pan_down_to_close && height < points.min() / 2 {
                        let _ = self.dismiss();
                    } else {
                        self.snap_to(points.nearest_index(height));
                    }
                    true
                }
                None => false,
            },
            _ => self.drag_height.is_some(),
        }
    }

    fn clamp_drag_height(&self, height: u16) -> u16 {
        let points = self.config.snap_points;
        let upper = if self.config.enable_over_drag {
            points.max().saturating_add(OVER_DRAG_ROWS)
        } else {
            points.max()
        };
        let lower = if self.config.enable_pan_down_to_close {
            0
        } else {
            points.min()
        };
        height.clamp(lower, upper)
    }

    /// Draw backdrop, sheet chrome, and the slotted content.
    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        content: impl FnOnce(Rect, &mut Buffer),
    ) {
        if self.state == PresentationState::Hidden {
            self.sheet_area = None;
            return;
        }

        let backdrop = (self.config.backdrop)(&BackdropProps {
            animated_index: self.animated_index(),
            tint: theme.backdrop,
        });
        backdrop.render(area, buf);

        let offset = self.config.bottom_inset.saturating_add(self.keyboard_lift());
        let sheet = bottom_anchored_rect(self.current_height(), offset, area);
        self.sheet_area = Some(sheet);
        if sheet.height == 0 {
            return;
        }

        Clear.render(sheet, buf);
        let block = Block::default()
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.sheet_bg).fg(theme.fg));
        let inner = block.inner(sheet);
        block.render(sheet, buf);

        if inner.height == 0 {
            return;
        }

        let indicator_width = INDICATOR_WIDTH.min(inner.width);
        let indicator_x = inner.x + (inner.width - indicator_width) / 2;
        buf.set_string(
            indicator_x,
            inner.y,
            "━".repeat(indicator_width as usize),
            Style::default().fg(theme.handle),
        );

        let content_area = Rect::new(
            inner.x + CONTENT_PADDING_X.min(inner.width / 2),
            inner.y + 1,
            inner.width.saturating_sub(CONTENT_PADDING_X * 2),
            inner.height.saturating_sub(1 + CONTENT_PADDING_BOTTOM),
        );
        if !content_area.is_empty() {
            content(content_area, buf);
        }
    }
}

impl PanelActuator for SheetOverlay {
    fn present(&mut self) -> Result<()> {
        match self.state {
            PresentationState::Hidden => {
                self.snap_index = self.config.snap_points.clamp_index(self.config.initial_index);
                self.progress = 0;
                self.drag_height = None;
                self.state = PresentationState::Presenting;
                if self.animation_frames == 0 {
                    self.finish_present();
                }
            }
            PresentationState::Dismissing => self.state = PresentationState::Presenting,
            PresentationState::Presenting | PresentationState::Presented => {}
        }
        Ok(())
    }

    fn dismiss(&mut self) -> Result<()> {
        match self.state {
            PresentationState::Presenting | PresentationState::Presented => {
                self.drag_height = None;
                self.state = PresentationState::Dismissing;
                if self.animation_frames == 0 || self.progress == 0 {
                    self.finish_dismiss();
                }
            }
            PresentationState::Hidden | PresentationState::Dismissing => {}
        }
        Ok(())
    }

    fn set_snap_points(&mut self, points: SnapPoints) {
        self.config.snap_points = points;
        self.snap_index = points.clamp_index(self.snap_index);
        self.drag_height = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::style::Color;

    use crate::backdrop::{BackdropConfig, DimBackdrop, PressBehavior};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 40,
    };

    struct Fixture {
        overlay: SheetOverlay,
        changes: Rc<RefCell<Vec<i32>>>,
    }

    fn fixture_with(frames: u16, tweak: impl FnOnce(&mut ActuatorConfig)) -> Fixture {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let backdrop = BackdropConfig::default();
        // 40 rows - 2 nav bar rows = 38 available -> [5, 30]
        let mut config = ActuatorConfig {
            initial_index: 0,
            snap_points: SnapPoints::from_available_height(38).unwrap(),
            on_index_change: Rc::new(move |index| sink.borrow_mut().push(index)),
            backdrop: Rc::new(move |props: &BackdropProps| {
                DimBackdrop::new(backdrop.opacity_at(props.animated_index), props.tint)
            }),
            backdrop_press: PressBehavior::None,
            bottom_inset: 2,
            enable_pan_down_to_close: false,
            enable_over_drag: false,
            enable_dynamic_sizing: false,
            keyboard_mode: KeyboardMode::NotApplicable,
        };
        tweak(&mut config);
        Fixture {
            overlay: SheetOverlay::new(config, frames),
            changes,
        }
    }

    fn fixture(frames: u16) -> Fixture {
        fixture_with(frames, |_| {})
    }

    fn presented(frames: u16) -> Fixture {
        let mut f = fixture(frames);
        f.overlay.present().unwrap();
        while f.overlay.tick() {}
        f
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn render(overlay: &mut SheetOverlay) -> Buffer {
        let mut buf = Buffer::empty(SCREEN);
        overlay.render(SCREEN, &mut buf, &Theme::default(), |area, buf| {
            buf.set_string(area.x, area.y, "quest", Style::default());
        });
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn test_present_animates_to_presented() {
        let mut f = fixture(3);
        f.overlay.present().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Presenting);
        assert_eq!(f.overlay.current_height(), 0);

        assert!(f.overlay.tick());
        assert!(f.overlay.tick());
        assert_eq!(f.overlay.state(), PresentationState::Presenting);
        assert!(f.overlay.tick());
        assert_eq!(f.overlay.state(), PresentationState::Presented);
        assert_eq!(f.overlay.current_height(), 5);
        assert!(!f.overlay.tick());
        assert_eq!(*f.changes.borrow(), vec![0]);
    }

    #[test]
    fn test_dismiss_animates_to_hidden() {
        let mut f = presented(2);
        f.overlay.dismiss().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Dismissing);
        while f.overlay.tick() {}
        assert_eq!(f.overlay.state(), PresentationState::Hidden);
        assert_eq!(*f.changes.borrow(), vec![0, -1]);
    }

    #[test]
    fn test_redundant_commands_are_noops() {
        let mut f = fixture(2);
        f.overlay.dismiss().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Hidden);

        f.overlay.present().unwrap();
        f.overlay.tick();
        f.overlay.present().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Presenting);
        f.overlay.tick();
        assert_eq!(f.overlay.state(), PresentationState::Presented);
    }

    #[test]
    fn test_present_while_dismissing_reverses() {
        let mut f = presented(4);
        f.overlay.dismiss().unwrap();
        f.overlay.tick();
        f.overlay.present().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Presenting);
        f.overlay.tick();
        assert_eq!(f.overlay.state(), PresentationState::Presented);
    }

    #[test]
    fn test_zero_frames_is_immediate() {
        let mut f = fixture(0);
        f.overlay.present().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Presented);
        f.overlay.dismiss().unwrap();
        assert_eq!(f.overlay.state(), PresentationState::Hidden);
    }

    #[test]
    fn test_snap_moves_are_clamped() {
        let mut f = presented(1);
        assert!(!f.overlay.snap_down());
        assert_eq!(f.overlay.state(), PresentationState::Presented);

        assert!(f.overlay.snap_up());
        assert_eq!(f.overlay.current_height(), 30);
        assert!(!f.overlay.snap_up());
        assert_eq!(f.overlay.snap_index(), 1);

        assert!(f.overlay.snap_down());
        assert_eq!(*f.changes.borrow(), vec![0, 1, 0]);
    }

    #[test]
    fn test_pan_down_to_close_when_enabled() {
        let mut f = fixture_with(0, |c| c.enable_pan_down_to_close = true);
        f.overlay.present().unwrap();
        assert!(f.overlay.snap_down());
        assert_eq!(f.overlay.state(), PresentationState::Hidden);
    }

    #[test]
    fn test_keys_ignored_unless_presented() {
        let mut f = fixture(2);
        assert!(!f.overlay.handle_key(key(KeyCode::Up)));
        f.overlay.present().unwrap();
        assert!(!f.overlay.handle_key(key(KeyCode::Up)));
        while f.overlay.tick() {}
        assert!(f.overlay.handle_key(key(KeyCode::Up)));
        assert_eq!(f.overlay.snap_index(), 1);
        assert!(!f.overlay.handle_key(key(KeyCode::Enter)));
    }

    #[test]
    fn test_backdrop_press_does_nothing() {
        let mut f = presented(1);
        render(&mut f.overlay);

        assert!(f.overlay.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 5, 0)));
        assert_eq!(f.overlay.state(), PresentationState::Presented);
        assert_eq!(f.overlay.snap_index(), 0);
        assert_eq!(f.overlay.press_backdrop(), BackdropAction::None);
    }

    #[test]
    fn test_backdrop_close_behavior_when_configured() {
        let mut f = fixture_with(0, |c| c.backdrop_press = PressBehavior::Close);
        f.overlay.present().unwrap();
        assert_eq!(f.overlay.press_backdrop(), BackdropAction::Close);
        assert_eq!(f.overlay.state(), PresentationState::Hidden);
    }

    #[test]
    fn test_handle_drag_snaps_to_nearest() {
        let mut f = presented(1);
        render(&mut f.overlay);
        // Sheet spans rows 33..38 (height 5 above the 2-row nav bar).
        let sheet = f.overlay.sheet_area().unwrap();
        assert_eq!(sheet, Rect::new(0, 33, 40, 5));

        assert!(f.overlay.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 33)));
        assert!(f.overlay.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 0)));
        // Over-drag disabled: clamped to the largest snap point.
        assert_eq!(f.overlay.current_height(), 30);
        assert!(f.overlay.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20, 0)));
        assert_eq!(f.overlay.snap_index(), 1);
        assert!(!f.overlay.is_dragging());
    }

    #[test]
    fn test_drag_down_never_closes() {
        let mut f = presented(1);
        render(&mut f.overlay);

        f.overlay.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 33));
        f.overlay.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 20, 39));
        assert_eq!(f.overlay.current_height(), 5);
        f.overlay.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 20, 39));
        assert_eq!(f.overlay.state(), PresentationState::Presented);
    }

    #[test]
    fn test_click_inside_body_goes_to_content() {
        let mut f = presented(1);
        render(&mut f.overlay);
        assert!(!f.overlay.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 36)));
    }

    #[test]
    fn test_keyboard_lifts_sheet_only_with_adjust_resize() {
        let mut f = fixture_with(0, |c| c.keyboard_mode = KeyboardMode::AdjustResize);
        f.overlay.present().unwrap();
        f.overlay.set_keyboard_height(4);
        render(&mut f.overlay);
        assert_eq!(f.overlay.sheet_area().unwrap().y, 29);

        let mut g = fixture(0);
        g.overlay.present().unwrap();
        g.overlay.set_keyboard_height(4);
        render(&mut g.overlay);
        assert_eq!(g.overlay.sheet_area().unwrap().y, 33);
    }

    #[test]
    fn test_render_draws_indicator_and_content() {
        let mut f = presented(1);
        let buf = render(&mut f.overlay);

        assert!(row_text(&buf, 33).starts_with('╭'));
        assert!(row_text(&buf, 34).contains("━━━━━━"));
        assert!(row_text(&buf, 35).contains("quest"));
    }

    #[test]
    fn test_render_dims_backdrop() {
        let mut f = presented(1);
        let buf = render(&mut f.overlay);
        // Non-RGB screen cells switch to the tint at half opacity.
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let mut f = fixture(1);
        let buf = render(&mut f.overlay);
        assert_eq!(buf, Buffer::empty(SCREEN));
        assert!(f.overlay.sheet_area().is_none());
    }

    #[test]
    fn test_viewport_change_keeps_index_in_range() {
        let mut f = presented(1);
        f.overlay.snap_up();
        f.overlay.set_snap_points(SnapPoints::from_available_height(20).unwrap());
        assert_eq!(f.overlay.snap_index(), 1);
        assert_eq!(f.overlay.current_height(), 16);
    }
}
