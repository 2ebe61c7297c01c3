//! Application settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default directory service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Default employee list endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/employees";

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the directory service.
    pub base_url: String,
    /// Path of the employee list endpoint.
    pub endpoint: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: 30,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if !self.endpoint.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "endpoint '{}' must start with '/'",
                self.endpoint
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Replace the base URL, e.g. from a command-line override.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let config = Config::default().with_base_url("hr.example.com");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with http"));
    }

    #[test]
    fn test_relative_endpoint_rejected() {
        let config = Config {
            endpoint: "api/employees".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let config = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default().with_base_url("https://hr.example.com");
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
