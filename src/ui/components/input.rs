//! Single-line text input component.
//!
//! Supports character insertion and deletion, cursor movement and a
//! digits-only mode for numeric fields such as the page-jump box. The cursor
//! is tracked in characters, so multi-byte names edit correctly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Which characters an input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Any printable character.
    #[default]
    Text,
    /// ASCII digits only.
    Numeric,
}

/// A text input widget.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The current input value.
    value: String,
    /// Cursor position, in characters.
    cursor: usize,
    /// Accepted characters.
    kind: InputKind,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty digits-only input.
    pub fn numeric() -> Self {
        Self {
            kind: InputKind::Numeric,
            ..Self::default()
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value and move the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clear the input.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        let len = self.value.chars().count();
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                let changed = !self.value.is_empty();
                self.clear();
                changed
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                if self.kind == InputKind::Numeric && !c.is_ascii_digit() {
                    return false;
                }
                self.value.insert(self.byte_index(self.cursor), c);
                self.cursor += 1;
                true
            }
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                self.value.remove(self.byte_index(self.cursor));
                true
            }
            (KeyCode::Delete, _) if self.cursor < len => {
                self.value.remove(self.byte_index(self.cursor));
                true
            }
            (KeyCode::Left, _) => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            (KeyCode::Right, _) => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = len;
                false
            }
            _ => false,
        }
    }

    /// Delete the word before the cursor.
    fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.byte_index(self.cursor);
        let before = &self.value[..end];
        let trimmed = before.trim_end();
        let start = trimmed
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.value.replace_range(start..end, "");
        self.cursor = self.value[..start].chars().count();
        true
    }

    /// Byte offset of the given character position.
    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    /// Terminal columns taken by the text before the cursor.
    ///
    /// Wide characters such as CJK take two columns.
    fn cursor_offset(&self) -> u16 {
        let before = &self.value[..self.byte_index(self.cursor)];
        u16::try_from(Span::raw(before).width()).unwrap_or(u16::MAX)
    }

    /// Render the input field with a label in its border.
    pub fn render_with_label(&self, frame: &mut Frame, area: Rect, label: &str, focused: bool) {
        let showing_placeholder = self.value.is_empty() && !self.placeholder.is_empty();
        let display = if showing_placeholder {
            self.placeholder.as_str()
        } else {
            self.value.as_str()
        };

        let style = if showing_placeholder {
            Style::default().fg(Color::DarkGray)
        } else if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let (border_style, title_style) = if focused {
            (
                Style::default().fg(Color::Yellow),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::White),
            )
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        frame.render_widget(Paragraph::new(display).style(style).block(block), area);

        if focused {
            let cursor_x = area.x.saturating_add(1).saturating_add(self.cursor_offset());
            if cursor_x < area.x.saturating_add(area.width.saturating_sub(1)) {
                frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TextInput, s: &str) {
        for c in s.chars() {
            input.handle_input(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_new_input() {
        let input = TextInput::new();
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
        assert_eq!(input.kind, InputKind::Text);
    }

    #[test]
    fn test_character_input() {
        let mut input = TextInput::new();
        assert!(input.handle_input(key(KeyCode::Char('B'))));
        type_str(&mut input, "o");
        assert_eq!(input.value(), "Bo");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_shift_character_input() {
        let mut input = TextInput::new();
        input.handle_input(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(input.value(), "A");
    }

    #[test]
    fn test_backspace() {
        let mut input = TextInput::new();
        type_str(&mut input, "abc");
        assert!(input.handle_input(key(KeyCode::Backspace)));
        assert_eq!(input.value(), "ab");
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = TextInput::new();
        assert!(!input.handle_input(key(KeyCode::Backspace)));
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::new();
        type_str(&mut input, "abc");
        input.handle_input(key(KeyCode::Home));
        assert!(input.handle_input(key(KeyCode::Delete)));
        assert_eq!(input.value(), "bc");
        assert!(!TextInput::new().handle_input(key(KeyCode::Delete)));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new();
        type_str(&mut input, "ac");
        input.handle_input(key(KeyCode::Left));
        type_str(&mut input, "b");
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new();
        type_str(&mut input, "Zoë");
        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Zë");
        input.handle_input(key(KeyCode::End));
        input.handle_input(key(KeyCode::Backspace));
        assert_eq!(input.value(), "Z");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::new();
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor, 0);
        type_str(&mut input, "ab");
        input.handle_input(key(KeyCode::Right));
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_ctrl_u_clear() {
        let mut input = TextInput::new();
        type_str(&mut input, "hello");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert!(!input.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_ctrl_w_delete_word() {
        let mut input = TextInput::new();
        type_str(&mut input, "ada love");
        assert!(input.handle_input(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL)));
        assert_eq!(input.value(), "ada ");
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_numeric_rejects_non_digits() {
        let mut input = TextInput::numeric();
        assert!(!input.handle_input(key(KeyCode::Char('x'))));
        assert!(!input.handle_input(key(KeyCode::Char('-'))));
        type_str(&mut input, "12");
        assert_eq!(input.value(), "12");
    }

    #[test]
    fn test_set_value_moves_cursor() {
        let mut input = TextInput::new();
        input.set_value("Grace");
        assert_eq!(input.cursor, 5);
        input.clear();
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_placeholder() {
        let input = TextInput::new().with_placeholder("Search by name...");
        assert_eq!(input.placeholder, "Search by name...");
        assert!(input.is_empty());
    }

    #[test]
    fn test_cursor_offset_counts_display_width() {
        let mut input = TextInput::new();
        type_str(&mut input, "漢字ab");
        assert_eq!(input.cursor, 4);
        assert_eq!(input.cursor_offset(), 6);

        input.handle_input(key(KeyCode::Left));
        input.handle_input(key(KeyCode::Left));
        assert_eq!(input.cursor_offset(), 4);

        input.handle_input(key(KeyCode::Home));
        assert_eq!(input.cursor_offset(), 0);
    }

    #[test]
    fn test_render_places_cursor_after_wide_chars() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut input = TextInput::new();
        type_str(&mut input, "李明");

        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                input.render_with_label(frame, area, "Search", true);
            })
            .unwrap();

        // Border column, then two columns per character.
        assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(5, 1));
    }

    #[test]
    fn test_render_with_long_input_does_not_overflow() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut input = TextInput::new();
        input.set_value("x".repeat(70_000));

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                input.render_with_label(frame, area, "Search", true);
            })
            .unwrap();

        assert_eq!(input.cursor_offset(), u16::MAX);
    }
}
