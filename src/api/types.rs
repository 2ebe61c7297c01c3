//! Employee directory response types.

use serde::{Deserialize, Serialize};

/// A single employee as returned by `GET /api/employees`.
///
/// The `id` is the service's opaque identifier. It is never shown to the
/// user; the table numbers rows by their position instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Opaque unique identifier (a UUID on the reference service).
    pub id: String,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Department name.
    pub department: String,
}

#[cfg(test)]
impl Employee {
    /// Create a new employee record.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            department: department.into(),
        }
    }
}
