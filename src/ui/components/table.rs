//! Paginated, sortable employee table.
//!
//! The table owns its own presentation state: the sort column, the current
//! page and the selected row. It is handed already-numbered rows and never
//! changes what they contain, only their order and which slice is shown.

use std::cmp::Ordering;
use std::ops::Range;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::loading::LoadingIndicator;
use super::search_bar::highlight_text;
use crate::api::Employee;

/// Rows shown on each page.
pub const ROWS_PER_PAGE: usize = 10;

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Display number (position in the filtered list, plus one).
    Id,
    Name,
    Position,
    Department,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 4] = [Column::Id, Column::Name, Column::Position, Column::Department];

    /// Header text.
    pub fn title(&self) -> &'static str {
        match self {
            Column::Id => "ID",
            Column::Name => "Name",
            Column::Position => "Position",
            Column::Department => "Department",
        }
    }

    /// Column for a sort hotkey, `'1'` to `'4'`.
    pub fn from_hotkey(c: char) -> Option<Self> {
        match c {
            '1' => Some(Column::Id),
            '2' => Some(Column::Name),
            '3' => Some(Column::Position),
            '4' => Some(Column::Department),
            _ => None,
        }
    }

    fn width(&self) -> Constraint {
        match self {
            Column::Id => Constraint::Length(6),
            Column::Name => Constraint::Percentage(34),
            Column::Position => Constraint::Percentage(30),
            Column::Department => Constraint::Percentage(30),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

/// A table row: an employee plus its display number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    /// One-based position of the employee in the filtered list.
    pub display_id: usize,
    pub employee: Employee,
}

/// Number rows by their position in `filtered`.
///
/// The number is not tied to the employee: the same person gets a
/// different ID under a different search.
pub fn number_rows(filtered: &[Employee]) -> Vec<EmployeeRow> {
    filtered
        .iter()
        .enumerate()
        .map(|(index, employee)| EmployeeRow {
            display_id: index + 1,
            employee: employee.clone(),
        })
        .collect()
}

/// Compare two rows by a column, text columns ignoring case.
fn compare(column: Column, a: &EmployeeRow, b: &EmployeeRow) -> Ordering {
    let text = |row: &EmployeeRow| -> String {
        match column {
            Column::Id => String::new(),
            Column::Name => row.employee.name.to_lowercase(),
            Column::Position => row.employee.position.to_lowercase(),
            Column::Department => row.employee.department.to_lowercase(),
        }
    };

    match column {
        Column::Id => a.display_id.cmp(&b.display_id),
        _ => text(a).cmp(&text(b)),
    }
}

/// Presentation state for the employee table.
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    sort: Option<SortState>,
    /// Current page, one-based.
    page: usize,
    /// Selected row within the current page.
    selected: usize,
    rows_per_page: usize,
}

impl Default for EmployeeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeTable {
    /// Create a table on page one with no sort.
    pub fn new() -> Self {
        Self {
            sort: None,
            page: 1,
            selected: 0,
            rows_per_page: ROWS_PER_PAGE,
        }
    }

    /// Toggle sorting on a column.
    ///
    /// A new column sorts ascending; the same column flips direction.
    pub fn toggle_sort(&mut self, column: Column) {
        let direction = match self.sort {
            Some(s) if s.column == column && s.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState { column, direction });
        self.selected = 0;
    }

    /// Sort rows in place by the active sort. Stable.
    pub fn sort_rows(&self, rows: &mut [EmployeeRow]) {
        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = compare(sort.column, a, b);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
    }

    /// Number of pages for `total` rows. Always at least one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.rows_per_page).max(1)
    }

    /// Current page, one-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to a page, clamped to `1..=page_count`.
    pub fn go_to_page(&mut self, page: usize, total: usize) {
        self.page = page.clamp(1, self.page_count(total));
        self.selected = 0;
    }

    /// Move to the next page if there is one.
    pub fn next_page(&mut self, total: usize) {
        if self.page < self.page_count(total) {
            self.page += 1;
            self.selected = 0;
        }
    }

    /// Move to the previous page if there is one.
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
        }
    }

    /// Pull the page and selection back into range after the row count changed.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.page_count(total));
        let visible = self.page_range(total).len();
        if self.selected >= visible {
            self.selected = visible.saturating_sub(1);
        }
    }

    /// Index range of the rows on the current page.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.rows_per_page).min(total);
        let end = (start + self.rows_per_page).min(total);
        start..end
    }

    /// Selected row within the current page.
    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection down, stopping at the last visible row.
    pub fn select_next(&mut self, total: usize) {
        let visible = self.page_range(total).len();
        if self.selected + 1 < visible {
            self.selected += 1;
        }
    }

    /// Move the selection up.
    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn header(&self) -> Row<'static> {
        let cells = Column::ALL.iter().map(|column| {
            let title = match self.sort {
                Some(s) if s.column == *column => {
                    format!("{} {}", column.title(), s.direction.arrow())
                }
                _ => column.title().to_string(),
            };
            Cell::from(title)
        });

        Row::new(cells).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }

    /// Render the table.
    ///
    /// `rows` must already be numbered and sorted; the current page of them
    /// is drawn. While `loading` is active the spinner replaces the body.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        rows: &[EmployeeRow],
        query: &str,
        loading: &LoadingIndicator,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Employees ");

        if loading.is_active() {
            let inner = block.inner(chunks[0]);
            frame.render_widget(block, chunks[0]);
            loading.render(frame, inner);
            return;
        }

        if rows.is_empty() {
            let empty = Paragraph::new("No employees found")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(empty, chunks[0]);
        } else {
            let body = rows[self.page_range(rows.len())].iter().map(|row| {
                Row::new(vec![
                    Cell::from(row.display_id.to_string()),
                    Cell::from(highlight_text(&row.employee.name, query)),
                    Cell::from(row.employee.position.clone()),
                    Cell::from(row.employee.department.clone()),
                ])
            });

            let table = Table::new(body, Column::ALL.iter().map(Column::width))
                .header(self.header())
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");

            let mut state = TableState::default().with_selected(Some(self.selected));
            frame.render_stateful_widget(table, chunks[0], &mut state);
        }

        let footer = Line::from(vec![
            Span::styled(
                format!(" Page {} of {} ", self.page, self.page_count(rows.len())),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(
                format!(" {} rows", rows.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[1]);
    }
}
