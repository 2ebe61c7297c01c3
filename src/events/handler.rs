//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};

use super::Event;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create an event handler that ticks every `tick_rate_ms`.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses, in which
    /// case `Event::Tick` is returned.
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports both press and release.
                CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    Ok(Event::Key(key_event))
                }
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}
