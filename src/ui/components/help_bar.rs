//! Contextual help bar component.
//!
//! Shows the key hints for whichever control has focus.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render the hint line for the given context.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext) {
    let line = Line::from(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into styled spans, keys (in brackets) in cyan.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                current.push(c);
            }
            ']' if current.starts_with('[') => {
                current.push(c);
                spans.push(Span::styled(
                    std::mem::take(&mut current),
                    Style::default().fg(Color::Cyan),
                ));
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(Color::DarkGray)));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hints_to_spans_simple() {
        let hints = "[j/k] move";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_parse_hints_to_spans_multiple_keys() {
        let hints = "[j/k] move  [n/p] page  [q] quit";
        let spans = parse_hints_to_spans(hints);
        // [j/k], " move  ", [n/p], " page  ", [q], " quit"
        assert_eq!(spans.len(), 6);
    }

    #[test]
    fn test_parse_hints_to_spans_empty() {
        let hints = "";
        let spans = parse_hints_to_spans(hints);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_key_spans_are_highlighted() {
        let spans = parse_hints_to_spans("[q] quit");
        assert_eq!(spans[0].content, "[q]");
        assert_eq!(spans[0].style.fg, Some(Color::Cyan));
        assert_eq!(spans[1].style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn test_every_context_parses() {
        for context in [KeyContext::Table, KeyContext::Search, KeyContext::PageJump] {
            assert!(!parse_hints_to_spans(get_context_hints(context)).is_empty());
        }
    }

    #[test]
    fn test_parse_hints_to_spans_no_brackets() {
        let hints = "just text";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 1);
    }
}
