//! Event handling for the application.
//!
//! This module handles keyboard input, terminal resizes and ticks.

mod handler;
mod keys;

pub use handler::EventHandler;
pub use keys::{get_context_hints, KeyContext};

use crossterm::event::KeyEvent;

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick interval elapsed without input.
    Tick,
}
