//! API error types for the directory client.

use thiserror::Error;

/// Errors that can occur when fetching from the employee directory.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or HTTP transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status code.
    #[error("Directory returned HTTP {status}: {context}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The request URL or an error excerpt from the body.
        context: String,
    },

    /// The body could not be parsed as an employee list.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The configured URL cannot be used.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from an HTTP status code.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        ApiError::Status {
            status: status.as_u16(),
            context: context.to_string(),
        }
    }

    /// The HTTP status code, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_from_status_404() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "/api/employees");
        assert_eq!(err.status(), Some(404));
        match err {
            ApiError::Status { context, .. } => assert_eq!(context, "/api/employees"),
            _ => panic!("Expected Status error"),
        }
    }

    #[test]
    fn test_error_from_status_500() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ApiError::InvalidResponse("expected array".to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "http://x/api/employees");
        assert_eq!(
            err.to_string(),
            "Directory returned HTTP 503: http://x/api/employees"
        );

        let err = ApiError::InvalidResponse("eof".to_string());
        assert_eq!(err.to_string(), "Invalid API response: eof");
    }
}
