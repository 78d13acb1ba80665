//! Viewport metrics and the providers that report them.

/// Margins reserved for device chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SafeAreaInsets {
    pub top: u16,
    pub bottom: u16,
}

/// Source of screen dimensions, consulted once per layout pass.
pub trait ViewportProvider {
    /// `(width, height)` of the window.
    fn window_size(&self) -> (u16, u16);

    fn safe_area_insets(&self) -> SafeAreaInsets;
}

/// Screen dimensions and bottom inset used to derive sheet layout.
///
/// The value doubles as the memoization key for snap points, so two equal
/// metrics always produce the same layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportMetrics {
    pub screen_width: u16,
    pub screen_height: u16,
    pub bottom_inset: u16,
}

impl ViewportMetrics {
    pub fn new(screen_width: u16, screen_height: u16, bottom_inset: u16) -> Self {
        Self {
            screen_width,
            screen_height,
            bottom_inset,
        }
    }

    /// Query a provider for the current metrics.
    pub fn from_provider(provider: &dyn ViewportProvider) -> Self {
        let (screen_width, screen_height) = provider.window_size();
        let insets = provider.safe_area_insets();
        Self::new(screen_width, screen_height, insets.bottom)
    }
}

/// Viewport with explicitly supplied dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedViewport {
    width: u16,
    height: u16,
    insets: SafeAreaInsets,
}

impl FixedViewport {
    pub fn new(width: u16, height: u16, insets: SafeAreaInsets) -> Self {
        Self {
            width,
            height,
            insets,
        }
    }
}

impl ViewportProvider for FixedViewport {
    fn window_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn safe_area_insets(&self) -> SafeAreaInsets {
        self.insets
    }
}

/// Terminal-backed viewport.
///
/// Terminals report no safe area, so insets come from configuration. The
/// size is updated from resize events rather than queried on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalViewport {
    width: u16,
    height: u16,
    insets: SafeAreaInsets,
}

impl TerminalViewport {
    /// Read the current terminal size.
    pub fn current(insets: SafeAreaInsets) -> std::io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::with_size(width, height, insets))
    }

    pub fn with_size(width: u16, height: u16, insets: SafeAreaInsets) -> Self {
        Self {
            width,
            height,
            insets,
        }
    }

    /// Apply a resize event.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }
}

impl ViewportProvider for TerminalViewport {
    fn window_size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn safe_area_insets(&self) -> SafeAreaInsets {
        self.insets
    }
}
