//! Logging configuration

use std::path::PathBuf;

use crate::core::config::ClientConfig;

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "umint=info,warn";

/// File name prefix for the rotating log (`umint.log.YYYY-MM-DD`).
pub const LOG_FILE_NAME: &str = "umint.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log filter directive (e.g., "umint=debug,info")
    pub log_level: String,
    /// Directory for daily-rotated log files; `None` writes to stderr
    pub log_dir: Option<PathBuf>,
    /// JSON lines instead of plain text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_FILTER.to_string(),
            log_dir: None,
            json: false,
        }
    }
}

impl From<&ClientConfig> for LogConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            log_level: config.log_level.clone(),
            log_dir: config.log_dir.clone(),
            json: config.log_json,
        }
    }
}

impl LogConfig {
    /// Current log file path, if logging to a file.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
