//! Reusable UI components.

mod help_bar;
mod input;
mod loading;
mod notification;
mod search_bar;
mod table;

pub use help_bar::render_context_help;
pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use notification::NotificationManager;
pub use search_bar::filter_by_name;
pub use table::{number_rows, Column, EmployeeRow, EmployeeTable};
