//! Core event types for questboard.
//!
//! Wraps crossterm polling into application events with a fixed tick so
//! animations can advance between input events.

pub mod event;

pub use event::{Event, EventHandler};
