//! Application-wide constants.

/// Event polling interval; animations advance once per tick.
pub const EVENT_TICK_MS: u64 = 50;

/// Maximum number of log entries kept in memory.
pub const MAX_LOG_ENTRIES: usize = 500;

/// Smaller sheet snap height as a percentage of the available height.
pub const SNAP_MIN_PERCENT: u32 = 15;

/// Larger sheet snap height as a percentage of the available height.
pub const SNAP_MAX_PERCENT: u32 = 80;

/// Side menu width as a percentage of the screen width.
pub const MENU_WIDTH_PERCENT: u16 = 75;

/// Header height in rows (buttons plus separator).
pub const HEADER_HEIGHT: u16 = 3;

/// Spacing between dialog buttons.
pub const MODAL_BUTTON_SPACING: u16 = 4;
