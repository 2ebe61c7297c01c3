//! Configuration management for staffview.
//!
//! This module handles loading and validating the user's configuration file.
//! A missing file is not an error: the defaults point at a local directory
//! service.

mod settings;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use settings::Config;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for `Config`.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

impl Config {
    /// Load configuration from the default location.
    ///
    /// The file lives at `<config_dir>/staffview/config.toml`.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file.
    ///
    /// Returns the defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("staffview").join("config.toml"))
    }
}
