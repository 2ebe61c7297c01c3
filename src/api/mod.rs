//! Employee directory API client and types.
//!
//! This module provides the interface for talking to the employee directory
//! HTTP service.

mod client;
pub mod error;
pub mod types;

pub use client::DirectoryClient;
pub use error::ApiError;
pub use types::Employee;
