//! The actuator seam: the overlay primitive that animates the sheet, and the
//! stable handle the controller addresses it through.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backdrop::{BackdropProps, DimBackdrop, PressBehavior};
use crate::error::{Result, SheetError};
use crate::inset::KeyboardMode;
use crate::snap::SnapPoints;

/// Write-only command surface of a sheet primitive.
///
/// Commands are fire-and-forget: an implementation starts its own animation
/// and returns immediately.
pub trait PanelActuator {
    fn present(&mut self) -> Result<()>;

    fn dismiss(&mut self) -> Result<()>;

    /// Replace the snap heights after a viewport change.
    fn set_snap_points(&mut self, _points: SnapPoints) {}
}

/// Receives the settled snap index, `-1` once the sheet has closed.
pub type IndexChangeCallback = Rc<dyn Fn(i32)>;

/// Builds the backdrop for a frame.
pub type BackdropFactory = Rc<dyn Fn(&BackdropProps) -> DimBackdrop>;

/// Creation-time configuration for an actuator.
#[derive(Clone)]
pub struct ActuatorConfig {
    pub initial_index: usize,
    pub snap_points: SnapPoints,
    pub on_index_change: IndexChangeCallback,
    pub backdrop: BackdropFactory,
    pub backdrop_press: PressBehavior,
    /// Rows kept free below the sheet.
    pub bottom_inset: u16,
    pub enable_pan_down_to_close: bool,
    pub enable_over_drag: bool,
    pub enable_dynamic_sizing: bool,
    pub keyboard_mode: KeyboardMode,
}

impl fmt::Debug for ActuatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActuatorConfig")
            .field("initial_index", &self.initial_index)
            .field("snap_points", &self.snap_points)
            .field("backdrop_press", &self.backdrop_press)
            .field("bottom_inset", &self.bottom_inset)
            .field("enable_pan_down_to_close", &self.enable_pan_down_to_close)
            .field("enable_over_drag", &self.enable_over_drag)
            .field("enable_dynamic_sizing", &self.enable_dynamic_sizing)
            .field("keyboard_mode", &self.keyboard_mode)
            .finish_non_exhaustive()
    }
}

/// Shared, stable reference to an externally owned actuator.
///
/// Clones address the same slot, so a handle given out once stays valid
/// across frames while the actuator behind it is attached and detached.
pub struct ActuatorHandle<A> {
    slot: Rc<RefCell<Option<A>>>,
}

impl<A> Clone for ActuatorHandle<A> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<A> Default for ActuatorHandle<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ActuatorHandle<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActuatorHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl<A> ActuatorHandle<A> {
    pub fn new() -> Self {
        Self {
            slot: Rc::new(RefCell::new(None)),
        }
    }

    /// Attach an actuator, returning the one it replaces.
    pub fn attach(&self, actuator: A) -> Option<A> {
        self.slot.borrow_mut().replace(actuator)
    }

    pub fn detach(&self) -> Option<A> {
        self.slot.borrow_mut().take()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.try_borrow().map(|s| s.is_some()).unwrap_or(true)
    }

    /// Run `f` against the actuator if one is attached and not already borrowed.
    pub fn with<R>(&self, f: impl FnOnce(&A) -> R) -> Option<R> {
        let slot = self.slot.try_borrow().ok()?;
        slot.as_ref().map(f)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut A) -> R) -> Option<R> {
        let mut slot = self.slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    }

    /// True when both handles address the same slot.
    pub fn same_handle(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<A: PanelActuator> ActuatorHandle<A> {
    pub fn present(&self) -> Result<()> {
        self.with_mut(|actuator| actuator.present())
            .unwrap_or(Err(SheetError::ActuatorUnavailable))
    }

    pub fn dismiss(&self) -> Result<()> {
        self.with_mut(|actuator| actuator.dismiss())
            .unwrap_or(Err(SheetError::ActuatorUnavailable))
    }

    pub fn set_snap_points(&self, points: SnapPoints) {
        self.with_mut(|actuator| actuator.set_snap_points(points));
    }
}
