//! Snap point math.
//!
//! The sheet opens at one of two heights derived from the space between the
//! top of the screen and the navigation bar:
//!
//! ```text
//! available = screen_height - nav_bar_height - platform_bottom_inset
//! min       = floor(0.15 * available)
//! max       = floor(0.80 * available)
//! ```

use questboard_config::constants::{SNAP_MAX_PERCENT, SNAP_MIN_PERCENT};

use crate::error::{Result, SheetError};
use crate::inset::{Platform, PlatformInsetPolicy};
use crate::viewport::ViewportMetrics;

/// Height left for the sheet once the nav bar and platform inset are removed.
pub fn available_height(
    metrics: &ViewportMetrics,
    nav_bar_height: u16,
    policy: &dyn PlatformInsetPolicy,
) -> Result<u16> {
    let available = i32::from(metrics.screen_height)
        - i32::from(nav_bar_height)
        - i32::from(policy.bottom_inset(metrics));

    if available <= 0 {
        return Err(SheetError::UnsupportedViewport { available });
    }
    Ok(available as u16)
}

/// Ordered pair of allowed open heights.
///
/// Invariant: `0 < min < max < available height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapPoints {
    min: u16,
    max: u16,
}

impl SnapPoints {
    /// Derive both heights from the available height.
    pub fn from_available_height(available: u16) -> Result<Self> {
        let percent_of = |percent: u32| (u32::from(available) * percent / 100) as u16;
        let min = percent_of(SNAP_MIN_PERCENT);
        let max = percent_of(SNAP_MAX_PERCENT);

        if min == 0 || min >= max || max >= available {
            return Err(SheetError::UnsupportedViewport {
                available: i32::from(available),
            });
        }
        Ok(Self { min, max })
    }

    pub fn compute(
        metrics: &ViewportMetrics,
        nav_bar_height: u16,
        policy: &dyn PlatformInsetPolicy,
    ) -> Result<Self> {
        Self::from_available_height(available_height(metrics, nav_bar_height, policy)?)
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    pub fn as_array(&self) -> [u16; 2] {
        [self.min, self.max]
    }

    pub fn len(&self) -> usize {
        2
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn last_index(&self) -> usize {
        self.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.as_array().get(index).copied()
    }

    /// Clamp an index into the valid range.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// Index of the snap height closest to `height` (ties go to the smaller).
    pub fn nearest_index(&self, height: u16) -> usize {
        let distance = |h: u16| h.abs_diff(height);
        if distance(self.max) < distance(self.min) {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SnapKey {
    metrics: ViewportMetrics,
    nav_bar_height: u16,
    platform: Platform,
}

/// Memoized [`SnapPoints::compute`], keyed by viewport identity.
#[derive(Debug, Default)]
pub struct SnapPointCache {
    entry: Option<(SnapKey, Result<SnapPoints>)>,
    computations: usize,
}

impl SnapPointCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for this viewport, computing it on a miss.
    pub fn get_or_compute(
        &mut self,
        metrics: &ViewportMetrics,
        nav_bar_height: u16,
        policy: &dyn PlatformInsetPolicy,
    ) -> Result<SnapPoints> {
        let key = SnapKey {
            metrics: *metrics,
            nav_bar_height,
            platform: policy.platform(),
        };

        if let Some((cached_key, value)) = &self.entry {
            if *cached_key == key {
                return value.clone();
            }
        }

        let value = SnapPoints::compute(metrics, nav_bar_height, policy);
        self.computations += 1;
        self.entry = Some((key, value.clone()));
        value
    }

    /// Drop the cached value (viewport change).
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Number of real computations performed so far.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
