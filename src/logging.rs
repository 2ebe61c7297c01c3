//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file so they never corrupt the terminal UI.
//! The level is taken from `RUST_LOG`.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "staffview=info,warn";

/// Initialize the logging system.
///
/// # Log Directory
///
/// Logs are stored in the platform-specific local data directory:
/// - Linux: `~/.local/share/staffview/logs/`
/// - macOS: `~/Library/Application Support/staffview/logs/`
/// - Windows: `C:\Users\<User>\AppData\Local\staffview\logs\`
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created, or
/// if a global subscriber is already installed.
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "staffview.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "staffview starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("staffview").join("logs"))
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("staffview shutting down");
}
