//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the employee list view and
//! the components it is built from.

pub mod components;
mod views;

pub use components::{render_context_help, NotificationManager};
pub use views::{ListAction, ListView};
