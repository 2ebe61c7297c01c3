//! Employee directory client implementation.
//!
//! This module provides the client for the directory's single read endpoint.
//! It handles request construction, status checking and body decoding.
//! There is deliberately no retry loop: a failed fetch is reported once and
//! the user decides whether to refresh.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::Employee;
use crate::config::Config;

/// The directory client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the directory service.
    base_url: String,
    /// Path of the employee list endpoint.
    endpoint: String,
}

impl DirectoryClient {
    /// Create a client from the application configuration.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn from_config(config: &Config) -> Result<Self> {
        info!("Creating directory client");
        Self::new(
            &config.base_url,
            &config.endpoint,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Create a client with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the base URL has no HTTP scheme or the
    /// endpoint is not an absolute path.
    pub fn new(base_url: &str, endpoint: &str, timeout: Duration) -> Result<Self> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "'{}' must start with http:// or https://",
                base_url
            )));
        }
        if !endpoint.starts_with('/') {
            return Err(ApiError::InvalidUrl(format!(
                "endpoint '{}' must start with '/'",
                endpoint
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
            endpoint: endpoint.to_string(),
        })
    }

    /// Fetch the full employee list.
    ///
    /// Calls `GET {base_url}{endpoint}` and returns the employees in the
    /// order the service sent them.
    #[instrument(skip(self))]
    pub async fn fetch_employees(&self) -> Result<Vec<Employee>> {
        let url = self.employees_url();
        debug!(url = %url, "Fetching employees");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                ApiError::Network(e)
            })?;

        let employees: Vec<Employee> = self.handle_response(response).await?;
        info!(count = employees.len(), "Fetched employees");
        Ok(employees)
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an error for a non-success response.
    ///
    /// Uses the service's `error` or `message` field when the body is JSON,
    /// otherwise the request URL.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
            let message = json
                .get("error")
                .or_else(|| json.get("message"))
                .and_then(|v| v.as_str());
            if let Some(message) = message {
                return ApiError::from_status(status, message);
            }
        }

        ApiError::from_status(status, url)
    }

    /// The full URL of the employee list endpoint.
    pub fn employees_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    url.to_string()
}
