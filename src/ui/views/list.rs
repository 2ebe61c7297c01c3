//! Employee list view.
//!
//! Owns the fetched employee list, the search text, the derived filtered
//! list and the page-jump input, and renders them through the table
//! component. The filtered list is always recomputed from the current
//! employees and the current search text, so neither a keystroke nor a
//! fresh fetch can leave a stale view behind.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::{debug, trace};

use crate::api::Employee;
use crate::events::KeyContext;
use crate::ui::components::{
    filter_by_name, number_rows, Column, EmployeeRow, EmployeeTable, LoadingIndicator, TextInput,
};

/// Actions the list view asks the application to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Fetch the employee list again.
    Refresh,
    /// Dismiss the newest notification.
    DismissNotification,
    /// Leave the application.
    Quit,
}

/// The employee list view.
#[derive(Debug)]
pub struct ListView {
    /// Employees as last fetched, in received order.
    employees: Vec<Employee>,
    /// Employees whose name matches the search text.
    filtered: Vec<Employee>,
    /// Progress indicator, active while a fetch is in flight.
    loading: LoadingIndicator,
    /// Search-by-name input.
    search: TextInput,
    /// Page-jump input.
    page_jump: TextInput,
    /// Owns the current page; the page-jump input only moves it.
    table: EmployeeTable,
    focus: KeyContext,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        Self {
            employees: Vec::new(),
            filtered: Vec::new(),
            loading: LoadingIndicator::with_message("Loading employees..."),
            search: TextInput::new().with_placeholder("Search by name..."),
            page_jump: TextInput::numeric().with_placeholder("Go to page..."),
            table: EmployeeTable::new(),
            focus: KeyContext::Table,
        }
    }

    /// All fetched employees.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Employees matching the current search.
    pub fn filtered_employees(&self) -> &[Employee] {
        &self.filtered
    }

    /// Replace the employee list and re-run the current search over it.
    pub fn set_employees(&mut self, employees: Vec<Employee>) {
        debug!(count = employees.len(), "Setting employees");
        self.employees = employees;
        self.refilter();
    }

    /// Replace the search text and re-filter.
    pub fn set_search(&mut self, search: &str) {
        self.search.set_value(search);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter_by_name(&self.employees, self.search.value());
        self.table.clamp(self.filtered.len());
        trace!(
            query = %self.search.value(),
            matches = self.filtered.len(),
            "Filter recomputed"
        );
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// Show or hide the progress indicator.
    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.loading.start();
        } else {
            self.loading.stop();
        }
    }

    /// Advance the spinner animation.
    pub fn tick(&mut self) {
        self.loading.tick();
    }

    /// The page the table is showing, starting at 1.
    pub fn current_page(&self) -> usize {
        self.table.page()
    }

    /// Apply a page-jump value.
    ///
    /// Values that are not positive integers are ignored. A valid value
    /// moves the table to that page, clamped to the last page.
    pub fn set_page_jump(&mut self, value: &str) {
        match value.parse::<usize>() {
            Ok(page) if page > 0 => {
                self.table.go_to_page(page, self.filtered.len());
                debug!(page, shown = self.table.page(), "Page jump");
            }
            _ => trace!(value, "Ignoring page-jump value"),
        }
    }

    /// The focused control.
    pub fn focus(&self) -> KeyContext {
        self.focus
    }

    /// Rows as the table shows them: numbered by filtered position, then sorted.
    pub fn rows(&self) -> Vec<EmployeeRow> {
        let mut rows = number_rows(&self.filtered);
        self.table.sort_rows(&mut rows);
        rows
    }

    /// Rows on the current table page.
    #[cfg(test)]
    pub fn visible_rows(&self) -> Vec<EmployeeRow> {
        let rows = self.rows();
        let range = self.table.page_range(rows.len());
        rows[range].to_vec()
    }

    /// The row under the selection cursor.
    #[cfg(test)]
    pub fn selected_row(&self) -> Option<EmployeeRow> {
        self.visible_rows().into_iter().nth(self.table.selected())
    }

    /// Handle keyboard input.
    ///
    /// Returns an action for the application when one is needed.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        if key.code == KeyCode::Tab {
            self.focus = self.focus.next();
            return None;
        }

        match self.focus {
            KeyContext::Search => {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => self.focus = KeyContext::Table,
                    _ => {
                        if self.search.handle_input(key) {
                            self.refilter();
                        }
                    }
                }
                None
            }
            KeyContext::PageJump => {
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => self.focus = KeyContext::Table,
                    _ => {
                        if self.page_jump.handle_input(key) {
                            let value = self.page_jump.value().to_string();
                            self.set_page_jump(&value);
                        }
                    }
                }
                None
            }
            KeyContext::Table => self.handle_table_input(key),
        }
    }

    fn handle_table_input(&mut self, key: KeyEvent) -> Option<ListAction> {
        let total = self.filtered.len();
        if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
            return None;
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.table.select_next(total),
            KeyCode::Char('k') | KeyCode::Up => self.table.select_prev(),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown => self.table.next_page(total),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp => self.table.prev_page(),
            KeyCode::Char('/') => self.focus = KeyContext::Search,
            KeyCode::Char('g') => self.focus = KeyContext::PageJump,
            KeyCode::Char('r') => return Some(ListAction::Refresh),
            KeyCode::Char('x') => return Some(ListAction::DismissNotification),
            KeyCode::Char('q') => return Some(ListAction::Quit),
            KeyCode::Esc if !self.search.is_empty() => self.set_search(""),
            KeyCode::Char(c) => {
                if let Some(column) = Column::from_hotkey(c) {
                    debug!(column = column.title(), "Toggling sort");
                    self.table.toggle_sort(column);
                }
            }
            _ => {}
        }
        None
    }

    /// Render the view: inputs on top, table below.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(area);

        let controls = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(20)])
            .split(chunks[0]);

        let page_label = format!(
            "Page {}/{}",
            self.current_page(),
            self.table.page_count(self.filtered.len())
        );
        self.page_jump.render_with_label(
            frame,
            controls[0],
            &page_label,
            self.focus == KeyContext::PageJump,
        );
        self.search.render_with_label(
            frame,
            controls[1],
            "Search",
            self.focus == KeyContext::Search,
        );

        self.table.render(
            frame,
            chunks[1],
            &self.rows(),
            self.search.value(),
            &self.loading,
        );
    }
}
