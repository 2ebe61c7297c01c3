//! Toast notifications.
//!
//! Non-blocking messages drawn in the bottom-right corner. They expire on
//! their own and the newest one can be dismissed from the keyboard.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// The type of notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Success message (green).
    Success,
    /// Error message (red).
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Success => "✓",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notification type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Success => Color::Green,
            NotificationType::Error => Color::Red,
        }
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The notification message.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// When the notification was created.
    pub created_at: Instant,
    /// How long the notification should be displayed.
    pub duration: Duration,
}

impl Notification {
    /// Create a new notification.
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Create a success notification shown for 3 seconds.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success, Duration::from_secs(3))
    }

    /// Create an error notification shown for 5 seconds.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error, Duration::from_secs(5))
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Manages the visible notifications.
#[derive(Debug)]
pub struct NotificationManager {
    notifications: VecDeque<Notification>,
    /// Maximum number of visible notifications.
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager.
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    /// Create a notification manager with a custom max visible count.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a notification, dropping the oldest past the visible limit.
    pub fn push(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Add a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    /// Add an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Remove expired notifications. Called on each tick.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Dismiss the newest notification.
    ///
    /// Returns false if there was nothing to dismiss.
    pub fn dismiss_latest(&mut self) -> bool {
        self.notifications.pop_back().is_some()
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Get an iterator over the notifications, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Render all notifications in the bottom-right corner of the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        // Borders take one column each side, the icon two more.
        let inner_width = width.saturating_sub(4) as usize;

        let heights: Vec<u16> = self
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                let lines = if inner_width > 0 {
                    text_len.div_ceil(inner_width) as u16
                } else {
                    1
                };
                lines + 2
            })
            .collect();

        let total_height = heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(Rect::new(x, y, width, total_height));

        for (notification, chunk) in self.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.notification_type.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_of(manager: &NotificationManager, notification_type: NotificationType) -> usize {
        manager
            .iter()
            .filter(|n| n.notification_type == notification_type)
            .count()
    }

    #[test]
    fn test_notification_durations() {
        assert_eq!(Notification::success("b").duration, Duration::from_secs(3));
        assert_eq!(Notification::error("c").duration, Duration::from_secs(5));
    }

    #[test]
    fn test_notification_is_expired() {
        let n = Notification::new("Test", NotificationType::Success, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(n.is_expired());
        assert!(!Notification::error("fresh").is_expired());
    }

    #[test]
    fn test_manager_max_visible() {
        let mut manager = NotificationManager::with_max_visible(2);
        manager.error("1");
        manager.error("2");
        manager.success("3");
        let messages: Vec<&str> = manager.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3"]);
    }

    #[test]
    fn test_manager_tick_removes_expired() {
        let mut manager = NotificationManager::new();
        manager.push(Notification::new(
            "Expires",
            NotificationType::Success,
            Duration::from_millis(1),
        ));
        manager.error("Stays");
        std::thread::sleep(Duration::from_millis(5));
        manager.tick();
        assert_eq!(manager.iter().count(), 1);
        assert_eq!(count_of(&manager, NotificationType::Error), 1);
    }

    #[test]
    fn test_dismiss_latest() {
        let mut manager = NotificationManager::new();
        assert!(!manager.dismiss_latest());

        manager.success("Loaded");
        manager.error("Failed");
        assert!(manager.dismiss_latest());
        assert_eq!(count_of(&manager, NotificationType::Error), 0);
        assert_eq!(count_of(&manager, NotificationType::Success), 1);

        assert!(manager.dismiss_latest());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_render_shows_message_in_corner() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut manager = NotificationManager::new();
        manager.error("Error loading employees.");

        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                manager.render(frame, area);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("Error loading employees."));
    }
}
