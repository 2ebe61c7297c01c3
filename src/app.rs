//! Main application state and event loop logic.
//!
//! This module follows The Elm Architecture (TEA): `App` is the model,
//! `update` and `handle_api_message` change it, and `view` draws it.
//!
//! Fetching is split in two halves so the model stays free of I/O. The app
//! asks for a fetch with [`App::request_fetch`]; the main loop takes the
//! request with [`App::take_pending_fetch`], spawns the task and hands the
//! handle back with [`App::attach_fetch`]. Each request gets a new
//! generation number, and only the result for the latest generation is
//! applied.

use tracing::{debug, error, info, trace, warn};

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::api::{ApiError, Employee};
use crate::config::Config;
use crate::error::AppError;
use crate::events::Event;
use crate::tasks::{ApiMessage, FetchHandle};
use crate::ui::{render_context_help, ListAction, ListView, NotificationManager};

/// The current state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Waiting for the first employee fetch to resolve.
    #[default]
    Loading,
    /// Showing the employee list.
    EmployeeList,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
pub struct App {
    state: AppState,
    should_quit: bool,
    list_view: ListView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    config: Config,
    /// Generation of the most recent fetch request.
    fetch_generation: u64,
    /// A fetch was requested and not yet spawned.
    pending_fetch: bool,
    /// The in-flight fetch task, aborted when replaced or dropped.
    in_flight: Option<FetchHandle>,
}

impl App {
    /// Create the application and request the initial fetch.
    pub fn new(config: Config) -> Self {
        debug!("Creating application instance");

        let mut app = Self {
            state: AppState::Loading,
            should_quit: false,
            list_view: ListView::new(),
            notifications: NotificationManager::new(),
            config,
            fetch_generation: 0,
            pending_fetch: false,
            in_flight: None,
        };
        app.request_fetch();
        app
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // ========================================================================
    // Fetch lifecycle
    // ========================================================================

    /// Request a new employee fetch.
    ///
    /// Starts the loading indicator and supersedes any fetch still in
    /// flight: its task is aborted and a late result would be ignored.
    pub fn request_fetch(&mut self) {
        if self.in_flight.take().is_some() {
            debug!("Superseding in-flight fetch");
        }
        self.fetch_generation += 1;
        self.pending_fetch = true;
        self.list_view.set_loading(true);
        info!(generation = self.fetch_generation, "Employee fetch requested");
    }

    /// Take the pending fetch request, if any.
    ///
    /// Returns the generation the spawned task must tag its result with.
    pub fn take_pending_fetch(&mut self) -> Option<u64> {
        if std::mem::take(&mut self.pending_fetch) {
            Some(self.fetch_generation)
        } else {
            None
        }
    }

    /// Keep the handle of a spawned fetch so it can be aborted later.
    pub fn attach_fetch(&mut self, handle: FetchHandle) {
        if handle.generation() == self.fetch_generation {
            self.in_flight = Some(handle);
        } else {
            // Dropping the handle aborts the task.
            debug!(generation = handle.generation(), "Discarding stale fetch handle");
        }
    }

    /// Handle a message from a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::EmployeesFetched { generation, result } => {
                if generation != self.fetch_generation || self.state == AppState::Exiting {
                    debug!(
                        generation,
                        current = self.fetch_generation,
                        "Ignoring stale fetch result"
                    );
                    return;
                }
                self.in_flight = None;
                self.apply_fetch_result(result);
            }
        }
    }

    fn apply_fetch_result(&mut self, result: Result<Vec<Employee>, ApiError>) {
        match result {
            Ok(employees) => {
                let count = employees.len();
                info!(count, "Employees loaded");
                self.list_view.set_employees(employees);
                // The first load is announced by the table itself.
                if self.state == AppState::EmployeeList {
                    self.notifications.success(format!("Loaded {} employees", count));
                }
            }
            Err(e) => {
                error!(error = %e, status = ?e.status(), "Failed to load employees");
                let error = AppError::from(e);
                self.notifications.error(error.user_message());
            }
        }
        self.list_view.set_loading(false);
        self.state = AppState::EmployeeList;
    }

    /// Abort any in-flight fetch and stop accepting results.
    pub fn shutdown(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
        self.pending_fetch = false;
        if self.in_flight.take().is_some() {
            info!("Aborted in-flight fetch on shutdown");
        }
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.list_view.tick();
                self.notifications.tick();
            }
        }
    }

    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        if self.state == AppState::Exiting {
            return;
        }

        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.shutdown();
            return;
        }

        if let Some(action) = self.list_view.handle_input(key_event) {
            match action {
                ListAction::Refresh => {
                    info!(
                        superseding = self.list_view.is_loading(),
                        "Refreshing employee list"
                    );
                    self.request_fetch();
                }
                ListAction::DismissNotification => {
                    if !self.notifications.dismiss_latest() {
                        trace!("No notification to dismiss");
                    }
                }
                ListAction::Quit => self.shutdown(),
            }
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the application UI.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Footer
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.list_view.render(frame, chunks[1]);
        render_context_help(frame, chunks[2], self.list_view.focus());

        // Notifications draw over everything else.
        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let total = self.list_view.employees().len();
        let shown = self.list_view.filtered_employees().len();
        let text = if shown == total {
            format!("Employee Directory ({})", total)
        } else {
            format!("Employee Directory ({} of {})", shown, total)
        };

        let title = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(title, area);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if self.in_flight.is_some() {
            warn!("Application dropped with a fetch in flight");
        }
    }
}
