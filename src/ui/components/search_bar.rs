//! Search-by-name filtering and match highlighting.
//!
//! Filtering is a case-insensitive substring match on the employee name
//! only. The result keeps the input order, and an empty query keeps every
//! employee.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::api::Employee;

/// Check whether a name contains an already lowercased query.
fn name_matches(name: &str, query_lower: &str) -> bool {
    query_lower.is_empty() || name.to_lowercase().contains(query_lower)
}

/// Return the employees whose name contains `query`, ignoring case.
pub fn filter_by_name(employees: &[Employee], query: &str) -> Vec<Employee> {
    let query_lower = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| name_matches(&employee.name, &query_lower))
        .cloned()
        .collect()
}

/// Byte length of the match of `query_lower` starting at `start` in `text`.
///
/// Comparison is done char by char on lowercased chars, so offsets always
/// land on char boundaries of the original text.
fn match_len_at(text: &str, start: usize, query_lower: &str) -> Option<usize> {
    let mut wanted = query_lower.chars().peekable();
    for (offset, c) in text[start..].char_indices() {
        for lower in c.to_lowercase() {
            if wanted.next() != Some(lower) {
                return None;
            }
        }
        if wanted.peek().is_none() {
            return Some(offset + c.len_utf8());
        }
    }
    None
}

/// Highlight every occurrence of `query` in `text`, ignoring case.
///
/// Matched spans keep the original casing of `text`.
pub fn highlight_text(text: &str, query: &str) -> Line<'static> {
    if query.is_empty() {
        return Line::from(text.to_string());
    }

    let query_lower = query.to_lowercase();
    let highlight = Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;
    let mut indices = text.char_indices();

    while let Some((start, _)) = indices.next() {
        if start < last_end {
            continue;
        }
        if let Some(len) = match_len_at(text, start, &query_lower) {
            if start > last_end {
                spans.push(Span::raw(text[last_end..start].to_string()));
            }
            spans.push(Span::styled(text[start..start + len].to_string(), highlight));
            last_end = start + len;
        }
    }

    if last_end < text.len() {
        spans.push(Span::raw(text[last_end..].to_string()));
    }

    Line::from(spans)
}
