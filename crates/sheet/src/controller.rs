//! Bottom sheet controller.
//!
//! `PanelController` slaves an actuator's present/dismiss lifecycle to a
//! boolean visibility input, derives snap points from the viewport, and
//! builds the actuator configuration (backdrop, drag policy, insets).
//!
//! ```text
//! set_visible(true)  ──► present()
//! set_visible(false) ──► dismiss()
//! unmount() / drop   ──► dismiss()   (always, whatever the last value)
//! ```

use std::fmt;
use std::rc::Rc;

use questboard_logger as logger;

use crate::actuator::{ActuatorConfig, ActuatorHandle, PanelActuator};
use crate::backdrop::{BackdropConfig, BackdropProps, DimBackdrop};
use crate::error::{Result, SheetError};
use crate::inset::PlatformInsetPolicy;
use crate::snap::{SnapPointCache, SnapPoints};
use crate::viewport::{ViewportMetrics, ViewportProvider};
use crate::watcher::{Transition, VisibilityWatcher};

/// Inputs supplied by the host screen.
pub struct SheetProps {
    pub is_visible: bool,
    pub initial_snap_index: usize,
    /// Kept for the host's own close affordances; the controller never calls it.
    pub on_request_close: Option<Box<dyn FnMut()>>,
}

impl Default for SheetProps {
    fn default() -> Self {
        Self {
            is_visible: false,
            initial_snap_index: 0,
            on_request_close: None,
        }
    }
}

impl fmt::Debug for SheetProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetProps")
            .field("is_visible", &self.is_visible)
            .field("initial_snap_index", &self.initial_snap_index)
            .field("on_request_close", &self.on_request_close.is_some())
            .finish()
    }
}

/// Snap index changes need no reaction from the host yet.
fn handle_index_change(_index: i32) {}

pub struct PanelController<A: PanelActuator> {
    props: SheetProps,
    nav_bar_height: u16,
    policy: Box<dyn PlatformInsetPolicy>,
    backdrop: BackdropConfig,
    handle: ActuatorHandle<A>,
    snap_cache: SnapPointCache,
    last_snap_points: Option<SnapPoints>,
    watcher: VisibilityWatcher,
    mounted: bool,
}

impl<A: PanelActuator> PanelController<A> {
    pub fn new(
        props: SheetProps,
        nav_bar_height: u16,
        policy: Box<dyn PlatformInsetPolicy>,
    ) -> Self {
        Self {
            props,
            nav_bar_height,
            policy,
            backdrop: BackdropConfig::default(),
            handle: ActuatorHandle::new(),
            snap_cache: SnapPointCache::new(),
            last_snap_points: None,
            watcher: VisibilityWatcher::new(),
            mounted: false,
        }
    }

    pub fn with_backdrop(mut self, backdrop: BackdropConfig) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Stable handle; the same slot for the controller's whole lifetime.
    pub fn handle(&self) -> &ActuatorHandle<A> {
        &self.handle
    }

    pub fn is_visible(&self) -> bool {
        self.props.is_visible
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Snap points for the viewport, memoized by its metrics.
    pub fn snap_points(&mut self, viewport: &dyn ViewportProvider) -> Result<SnapPoints> {
        let metrics = ViewportMetrics::from_provider(viewport);
        self.snap_cache
            .get_or_compute(&metrics, self.nav_bar_height, self.policy.as_ref())
    }

    /// Compute snap points and push them to the actuator when they changed.
    pub fn sync_layout(&mut self, viewport: &dyn ViewportProvider) -> Result<SnapPoints> {
        let points = self.snap_points(viewport)?;
        if self.last_snap_points != Some(points) {
            self.last_snap_points = Some(points);
            self.handle.set_snap_points(points);
        }
        Ok(points)
    }

    /// Forget cached layout after a viewport change event.
    pub fn invalidate_layout(&mut self) {
        self.snap_cache.invalidate();
    }

    /// Configuration an actuator should be created with for this viewport.
    pub fn actuator_config(&mut self, viewport: &dyn ViewportProvider) -> Result<ActuatorConfig> {
        let snap_points = self.snap_points(viewport)?;
        let backdrop = self.backdrop;

        Ok(ActuatorConfig {
            initial_index: snap_points.clamp_index(self.props.initial_snap_index),
            snap_points,
            on_index_change: Rc::new(handle_index_change),
            backdrop: Rc::new(move |props: &BackdropProps| {
                DimBackdrop::new(backdrop.opacity_at(props.animated_index), props.tint)
            }),
            backdrop_press: backdrop.press_behavior,
            bottom_inset: self.nav_bar_height,
            enable_pan_down_to_close: false,
            enable_over_drag: false,
            enable_dynamic_sizing: false,
            keyboard_mode: self.policy.keyboard_mode(),
        })
    }

    /// Attach the actuator and run the visibility effect for the current props.
    ///
    /// Mounting while visible counts as a false -> true transition.
    pub fn mount(&mut self, actuator: A) {
        if self.mounted {
            self.unmount();
        }
        self.handle.attach(actuator);
        self.mounted = true;
        self.last_snap_points = None;
        self.apply_visibility();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.props.is_visible = visible;
        if self.mounted {
            self.apply_visibility();
        }
    }

    /// Dismiss unconditionally, then detach and return the actuator.
    pub fn unmount(&mut self) -> Option<A> {
        if !self.mounted {
            return None;
        }
        self.issue_dismiss();
        self.mounted = false;
        self.watcher.reset();
        self.handle.detach()
    }

    fn apply_visibility(&mut self) {
        match self.watcher.observe(self.props.is_visible) {
            Some(Transition::Shown) => self.issue_present(),
            Some(Transition::Hidden) => self.issue_dismiss(),
            None => {}
        }
    }

    fn issue_present(&self) {
        match self.handle.present() {
            Ok(()) | Err(SheetError::ActuatorUnavailable) => {}
            Err(e) => logger::error(format!("Error presenting bottom sheet: {}", e)),
        }
    }

    fn issue_dismiss(&self) {
        // Dismiss failures during teardown are expected.
        let _ = self.handle.dismiss();
    }
}

impl<A: PanelActuator> Drop for PanelController<A> {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::backdrop::PressBehavior;
    use crate::inset::{IgnoreBottomInset, KeyboardMode, RespectBottomInset};
    use crate::viewport::{FixedViewport, SafeAreaInsets};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Command {
        Present,
        Dismiss,
        SnapPoints([u16; 2]),
    }

    type Log = Rc<RefCell<Vec<Command>>>;

    struct RecordingActuator {
        log: Log,
        present_error: Option<SheetError>,
        fail_dismiss: bool,
    }

    impl RecordingActuator {
        fn new(log: &Log) -> Self {
            Self {
                log: Rc::clone(log),
                present_error: None,
                fail_dismiss: false,
            }
        }
    }

    impl PanelActuator for RecordingActuator {
        fn present(&mut self) -> Result<()> {
            self.log.borrow_mut().push(Command::Present);
            if let Some(error) = self.present_error.clone() {
                return Err(error);
            }
            Ok(())
        }

        fn dismiss(&mut self) -> Result<()> {
            self.log.borrow_mut().push(Command::Dismiss);
            if self.fail_dismiss {
                return Err(SheetError::DismissalFailure("gone".into()));
            }
            Ok(())
        }

        fn set_snap_points(&mut self, points: SnapPoints) {
            self.log
                .borrow_mut()
                .push(Command::SnapPoints(points.as_array()));
        }
    }

    fn controller(visible: bool) -> PanelController<RecordingActuator> {
        let props = SheetProps {
            is_visible: visible,
            ..SheetProps::default()
        };
        PanelController::new(props, 80, Box::new(RespectBottomInset))
    }

    fn viewport() -> FixedViewport {
        FixedViewport::new(400, 800, SafeAreaInsets { top: 0, bottom: 20 })
    }

    fn commands(log: &Log) -> Vec<Command> {
        log.borrow().clone()
    }

    #[test]
    fn test_toggle_sequence_orders_commands() {
        let log = Log::default();
        let mut sheet = controller(false);
        sheet.mount(RecordingActuator::new(&log));

        sheet.set_visible(true);
        sheet.set_visible(false);
        sheet.set_visible(true);

        assert_eq!(
            commands(&log),
            vec![Command::Present, Command::Dismiss, Command::Present]
        );
    }

    #[test]
    fn test_repeated_values_issue_nothing() {
        let log = Log::default();
        let mut sheet = controller(false);
        sheet.mount(RecordingActuator::new(&log));

        sheet.set_visible(false);
        sheet.set_visible(true);
        sheet.set_visible(true);

        assert_eq!(commands(&log), vec![Command::Present]);
    }

    #[test]
    fn test_mount_visible_presents_once() {
        let log = Log::default();
        let mut sheet = controller(true);
        sheet.mount(RecordingActuator::new(&log));

        assert_eq!(commands(&log), vec![Command::Present]);
    }

    #[test]
    fn test_mount_hidden_issues_nothing() {
        let log = Log::default();
        let mut sheet = controller(false);
        sheet.mount(RecordingActuator::new(&log));

        assert!(commands(&log).is_empty());
    }

    #[test]
    fn test_unmount_while_visible_dismisses_once() {
        let log = Log::default();
        let mut sheet = controller(true);
        sheet.mount(RecordingActuator::new(&log));

        assert!(sheet.unmount().is_some());
        assert!(sheet.unmount().is_none());
        drop(sheet);

        assert_eq!(commands(&log), vec![Command::Present, Command::Dismiss]);
    }

    #[test]
    fn test_drop_dismisses() {
        let log = Log::default();
        {
            let mut sheet = controller(true);
            sheet.mount(RecordingActuator::new(&log));
        }
        assert_eq!(commands(&log), vec![Command::Present, Command::Dismiss]);
    }

    #[test]
    fn test_unmount_while_hidden_still_dismisses() {
        let log = Log::default();
        let mut sheet = controller(false);
        sheet.mount(RecordingActuator::new(&log));
        sheet.unmount();

        assert_eq!(commands(&log), vec![Command::Dismiss]);
    }

    #[test]
    fn test_commands_before_mount_are_absorbed() {
        let log = Log::default();
        let mut sheet = controller(false);

        sheet.set_visible(true);
        assert!(commands(&log).is_empty());
        assert!(sheet.unmount().is_none());

        sheet.mount(RecordingActuator::new(&log));
        assert_eq!(commands(&log), vec![Command::Present]);
    }

    #[test]
    fn test_present_failure_stays_inside_controller() {
        let log = Log::default();
        let mut sheet = controller(false);
        let mut actuator = RecordingActuator::new(&log);
        actuator.present_error = Some(SheetError::PresentationFailure("boom".into()));
        sheet.mount(actuator);

        sheet.set_visible(true);
        sheet.set_visible(false);
        sheet.set_visible(true);

        assert_eq!(
            commands(&log),
            vec![Command::Present, Command::Dismiss, Command::Present]
        );
        assert_eq!(sheet.handle().dismiss(), Ok(()));
    }

    #[test]
    fn test_present_failure_is_logged_unavailable_is_not() {
        logger::init(None, 1000, logger::LogLevel::Debug);

        let log = Log::default();
        let mut failing = RecordingActuator::new(&log);
        failing.present_error = Some(SheetError::PresentationFailure("gpu lost".into()));
        let mut sheet = controller(true);
        sheet.mount(failing);

        let mut detached = RecordingActuator::new(&log);
        detached.present_error = Some(SheetError::ActuatorUnavailable);
        let mut other = controller(true);
        other.mount(detached);

        let messages: Vec<String> = logger::get_entries()
            .into_iter()
            .filter(|entry| entry.level == logger::LogLevel::Error)
            .map(|entry| entry.message)
            .collect();
        assert!(messages
            .iter()
            .any(|m| m == "Error presenting bottom sheet: failed to present panel: gpu lost"));
        assert!(!messages.iter().any(|m| m.contains("not attached")));
    }

    #[test]
    fn test_dismiss_failure_is_discarded() {
        let log = Log::default();
        let mut sheet = controller(true);
        let mut actuator = RecordingActuator::new(&log);
        actuator.fail_dismiss = true;
        sheet.mount(actuator);

        sheet.set_visible(false);
        assert!(sheet.unmount().is_some());
        assert_eq!(
            commands(&log),
            vec![Command::Present, Command::Dismiss, Command::Dismiss]
        );
    }

    #[test]
    fn test_handle_identity_survives_remount() {
        let log = Log::default();
        let mut sheet = controller(true);
        let before = sheet.handle().clone();

        sheet.mount(RecordingActuator::new(&log));
        sheet.mount(RecordingActuator::new(&log));

        assert!(before.same_handle(sheet.handle()));
        assert!(before.is_attached());
        assert_eq!(
            commands(&log),
            vec![Command::Present, Command::Dismiss, Command::Present]
        );
    }

    #[test]
    fn test_on_request_close_is_never_called() {
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let props = SheetProps {
            is_visible: true,
            initial_snap_index: 0,
            on_request_close: Some(Box::new(move || *counter.borrow_mut() += 1)),
        };
        let log = Log::default();
        let mut sheet = PanelController::new(props, 80, Box::new(RespectBottomInset));
        sheet.mount(RecordingActuator::new(&log));
        sheet.set_visible(false);
        sheet.unmount();

        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_snap_points_follow_platform_policy() {
        let mut respecting = controller(false);
        assert_eq!(
            respecting.snap_points(&viewport()).unwrap().as_array(),
            [105, 560]
        );

        let mut ignoring: PanelController<RecordingActuator> =
            PanelController::new(SheetProps::default(), 80, Box::new(IgnoreBottomInset));
        assert_eq!(
            ignoring.snap_points(&viewport()).unwrap().as_array(),
            [108, 576]
        );
    }

    #[test]
    fn test_sync_layout_pushes_only_changes() {
        let log = Log::default();
        let mut sheet = controller(false);
        sheet.mount(RecordingActuator::new(&log));

        sheet.sync_layout(&viewport()).unwrap();
        sheet.sync_layout(&viewport()).unwrap();
        let rotated = FixedViewport::new(800, 400, SafeAreaInsets { top: 0, bottom: 20 });
        sheet.sync_layout(&rotated).unwrap();

        assert_eq!(
            commands(&log),
            vec![
                Command::SnapPoints([105, 560]),
                Command::SnapPoints([45, 240])
            ]
        );
    }

    #[test]
    fn test_actuator_config_policy() {
        let mut sheet = controller(false);
        let config = sheet.actuator_config(&viewport()).unwrap();

        assert_eq!(config.initial_index, 0);
        assert_eq!(config.snap_points.as_array(), [105, 560]);
        assert_eq!(config.bottom_inset, 80);
        assert!(!config.enable_pan_down_to_close);
        assert!(!config.enable_over_drag);
        assert!(!config.enable_dynamic_sizing);
        assert_eq!(config.keyboard_mode, KeyboardMode::NotApplicable);
        (config.on_index_change)(1);
    }

    #[test]
    fn test_actuator_config_backdrop_factory() {
        let mut sheet = controller(false);
        let config = sheet.actuator_config(&viewport()).unwrap();
        let tint = ratatui::style::Color::Black;

        let closed = (config.backdrop)(&BackdropProps {
            animated_index: -1.0,
            tint,
        });
        let open = (config.backdrop)(&BackdropProps {
            animated_index: 0.0,
            tint,
        });

        assert_eq!(closed.opacity, 0.0);
        assert_eq!(open.opacity, 0.5);
        assert_eq!(config.backdrop_press, PressBehavior::None);
    }

    #[test]
    fn test_initial_snap_index_is_clamped() {
        let props = SheetProps {
            initial_snap_index: 7,
            ..SheetProps::default()
        };
        let mut sheet: PanelController<RecordingActuator> =
            PanelController::new(props, 80, Box::new(RespectBottomInset));
        assert_eq!(sheet.actuator_config(&viewport()).unwrap().initial_index, 1);
    }

    #[test]
    fn test_unsupported_viewport_is_reported() {
        let mut sheet = controller(false);
        let tiny = FixedViewport::new(10, 4, SafeAreaInsets::default());
        assert!(matches!(
            sheet.snap_points(&tiny),
            Err(SheetError::UnsupportedViewport { .. })
        ));
    }
}
