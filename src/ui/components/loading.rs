//! Loading indicator component.
//!
//! An animated spinner shown in place of the table body while the employee
//! list is being fetched.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::with_message("Loading...")
    }
}

impl LoadingIndicator {
    /// Create an inactive loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Start the loading indicator.
    pub fn start(&mut self) {
        self.active = true;
        self.spinner_state = 0;
    }

    /// Stop the loading indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Check if the loading indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance the spinner animation. Called on each tick.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Get the formatted loading text, empty when inactive.
    pub fn text(&self) -> String {
        if self.active {
            format!("{} {}", self.spinner_frame(), self.message)
        } else {
            String::new()
        }
    }

    /// Render the loading indicator centered in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let paragraph = Paragraph::new(self.text())
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
    }
}
