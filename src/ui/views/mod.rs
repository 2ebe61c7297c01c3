//! Application views (screens).

mod list;

pub use list::{ListAction, ListView};
