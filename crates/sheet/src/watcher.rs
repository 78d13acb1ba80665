//! Visibility transition watcher.

/// Edge reported by [`VisibilityWatcher::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// false -> true
    Shown,
    /// true -> false
    Hidden,
}

/// Compares each observed visibility with the previous one.
///
/// Starts from "not visible", so a first observation of `true` reports
/// [`Transition::Shown`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VisibilityWatcher {
    last: bool,
}

impl VisibilityWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, visible: bool) -> Option<Transition> {
        let previous = std::mem::replace(&mut self.last, visible);
        match (previous, visible) {
            (false, true) => Some(Transition::Shown),
            (true, false) => Some(Transition::Hidden),
            _ => None,
        }
    }

    pub fn last(&self) -> bool {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_edges_only() {
        let mut watcher = VisibilityWatcher::new();
        assert_eq!(watcher.observe(false), None);
        assert_eq!(watcher.observe(true), Some(Transition::Shown));
        assert_eq!(watcher.observe(true), None);
        assert_eq!(watcher.observe(false), Some(Transition::Hidden));
        assert_eq!(watcher.observe(false), None);
    }

    #[test]
    fn test_reset_forgets_last_value() {
        let mut watcher = VisibilityWatcher::new();
        watcher.observe(true);
        watcher.reset();
        assert!(!watcher.last());
        assert_eq!(watcher.observe(true), Some(Transition::Shown));
    }
}
