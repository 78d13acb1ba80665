//! Error kinds raised around the panel actuator.

use thiserror::Error;

/// Failures the sheet layer can observe.
///
/// None of these leave [`PanelController`](crate::PanelController): it logs
/// presentation failures and discards the rest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The handle has no actuator attached (not mounted yet, or torn down).
    #[error("panel actuator is not attached")]
    ActuatorUnavailable,

    #[error("failed to present panel: {0}")]
    PresentationFailure(String),

    #[error("failed to dismiss panel: {0}")]
    DismissalFailure(String),

    /// The viewport leaves no room for two distinct snap heights.
    #[error("viewport too small for the panel (available height {available})")]
    UnsupportedViewport { available: i32 },
}

pub type Result<T> = std::result::Result<T, SheetError>;
