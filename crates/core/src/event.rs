//! Event types for questboard.
//!
//! - `Event` - Application-level events (keyboard, mouse, resize, tick)
//! - `EventHandler` - Polling for terminal events

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};

/// Application event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal resize event
    Resize(u16, u16),
    /// Tick event (for animations)
    Tick,
}

impl Event {
    /// Map a raw crossterm event. Key releases and repeats collapse to `None`.
    pub fn from_crossterm(raw: CrosstermEvent) -> Option<Self> {
        match raw {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
            CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
            _ => None,
        }
    }
}

/// Event handler for polling terminal events
pub struct EventHandler {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    /// Wait for next event.
    ///
    /// A steady input stream still yields a `Tick` once per tick rate, so
    /// animations keep moving while the user holds a key.
    pub fn next(&mut self) -> Result<Event> {
        loop {
            let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Some(event) = Event::from_crossterm(event::read()?) {
                    return Ok(event);
                }
            }
            if self.last_tick.elapsed() >= self.tick_rate {
                self.last_tick = Instant::now();
                return Ok(Event::Tick);
            }
        }
    }
}
