//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber pipeline from `tracing`
//! macros to the rotating log file.

use super::file_writer::RotatingFileWriter;
use crate::Config;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log file name inside the data directory.
const LOG_FILE_NAME: &str = "imagefinder.log";

/// Initializes the tracing subscriber with file-based output.
///
/// Sets up a tracing subscriber pipeline that:
/// 1. Filters events based on `RUST_LOG` or the configured log level
/// 2. Formats events and span context as plain text lines
/// 3. Writes to a rotating file with backups
///
/// # Level Resolution
///
/// 1. `RUST_LOG` environment variable if set and valid
/// 2. `config.log_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// `config.log_file` if set, otherwise `imagefinder.log` in
/// [`get_data_dir`](crate::infrastructure::get_data_dir).
///
/// # Initialization Behavior
///
/// - Creates the log directory if it doesn't exist
/// - Silently returns if directory creation fails (logging is optional)
/// - Idempotent: safe to call multiple times (only the first call takes effect)
///
/// # Example
///
/// ```rust
/// use imagefinder::observability::init_tracing;
/// use imagefinder::Config;
///
/// let config = Config {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.log_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let log_file = log_file_path(config);
    if let Some(parent) = log_file.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let writer = RotatingFileWriter::new(log_file);
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || writer.clone());

    let subscriber = tracing_subscriber::registry().with(filter).with(file_layer);

    let _ = subscriber.try_init();
}

fn log_file_path(config: &Config) -> PathBuf {
    config
        .log_file
        .clone()
        .unwrap_or_else(|| crate::infrastructure::get_data_dir().join(LOG_FILE_NAME))
}
