//! Centralized error types for staffview.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror`.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// The message shown for every failed employee fetch.
///
/// The cause is logged; the user always sees the same text.
pub const LOAD_FAILED_MESSAGE: &str = "Error loading employees.";

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// API-related errors.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    ///
    /// Every fetch failure, whatever its cause, maps to
    /// [`LOAD_FAILED_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read configuration file. Please check the file is readable."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
            },
            AppError::Api(_) => LOAD_FAILED_MESSAGE.to_string(),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_app_error_from_api_error() {
        let app_err: AppError = ApiError::InvalidResponse("eof".to_string()).into();
        assert!(matches!(app_err, AppError::Api(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_user_message_is_generic_for_all_api_errors() {
        let errors = vec![
            ApiError::from_status(reqwest::StatusCode::NOT_FOUND, "x"),
            ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "y"),
            ApiError::InvalidResponse("eof".to_string()),
            ApiError::InvalidUrl("z".to_string()),
        ];

        for err in errors {
            assert_eq!(AppError::Api(err).user_message(), LOAD_FAILED_MESSAGE);
        }
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad endpoint".to_string()));
        assert!(err.user_message().contains("bad endpoint"));
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("raw mode unavailable");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: raw mode unavailable");
    }
}
