//! Platform-specific inset and keyboard handling.
//!
//! One platform family subtracts the bottom safe-area inset from the space
//! available to the sheet and the other ignores it. The keyboard behaves the
//! other way round: only the family without the inset uses a soft keyboard
//! overlay the sheet has to avoid.

use std::fmt::Debug;
use std::str::FromStr;

use crate::viewport::ViewportMetrics;

/// Platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Respects the bottom safe-area inset.
    Ios,
    /// Ignores the bottom inset, resizes for the soft keyboard.
    Android,
}

impl Platform {
    /// Family for the host operating system.
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Ios
        } else {
            Platform::Android
        }
    }

    pub fn inset_policy(self) -> Box<dyn PlatformInsetPolicy> {
        match self {
            Platform::Ios => Box::new(RespectBottomInset),
            Platform::Android => Box::new(IgnoreBottomInset),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "auto" => Ok(Platform::detect()),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

/// How the sheet reacts to an on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardMode {
    /// Lift the sheet so the keyboard never covers it.
    AdjustResize,
    NotApplicable,
}

/// Decides how much of the bottom inset the sheet layout gives up.
pub trait PlatformInsetPolicy: Debug {
    fn platform(&self) -> Platform;

    /// Rows subtracted from the available height.
    fn bottom_inset(&self, metrics: &ViewportMetrics) -> u16;

    fn keyboard_mode(&self) -> KeyboardMode;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RespectBottomInset;

impl PlatformInsetPolicy for RespectBottomInset {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn bottom_inset(&self, metrics: &ViewportMetrics) -> u16 {
        metrics.bottom_inset
    }

    fn keyboard_mode(&self) -> KeyboardMode {
        KeyboardMode::NotApplicable
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreBottomInset;

impl PlatformInsetPolicy for IgnoreBottomInset {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn bottom_inset(&self, _metrics: &ViewportMetrics) -> u16 {
        0
    }

    fn keyboard_mode(&self) -> KeyboardMode {
        KeyboardMode::AdjustResize
    }
}
