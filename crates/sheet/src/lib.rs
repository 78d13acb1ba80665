//! Modal bottom sheet presentation engine.
//!
//! A sheet is presented over existing content, anchored to the bottom of the
//! screen above the navigation bar, with two discrete open heights and a
//! dimmed backdrop. Its lifecycle is driven by a single visibility flag:
//!
//! - [`PanelController`] turns visibility edges into present/dismiss commands
//!   and derives layout from the viewport.
//! - [`PanelActuator`] is the seam to the primitive that animates the sheet;
//!   [`SheetOverlay`] is the terminal implementation.
//! - [`PlatformInsetPolicy`] captures how each platform family treats the
//!   bottom safe-area inset.

pub mod actuator;
pub mod backdrop;
pub mod controller;
pub mod error;
pub mod inset;
pub mod overlay;
pub mod snap;
pub mod viewport;
pub mod watcher;

pub use actuator::{ActuatorConfig, ActuatorHandle, PanelActuator};
pub use backdrop::{BackdropAction, BackdropConfig, BackdropProps, DimBackdrop, PressBehavior};
pub use controller::{PanelController, SheetProps};
pub use error::{Result, SheetError};
pub use inset::{IgnoreBottomInset, KeyboardMode, Platform, PlatformInsetPolicy, RespectBottomInset};
pub use overlay::{PresentationState, SheetOverlay};
pub use snap::{available_height, SnapPointCache, SnapPoints};
pub use viewport::{FixedViewport, SafeAreaInsets, TerminalViewport, ViewportMetrics, ViewportProvider};
pub use watcher::{Transition, VisibilityWatcher};
