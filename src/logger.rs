//! Logging setup and the in-memory event log
//!
//! Diagnostic output goes through the `log` facade. When enabled in the
//! configuration, a `fern` dispatcher writes it to a file in the user cache
//! directory; the terminal itself is never written to because the TUI owns it.

use crate::config::LoggingConfig;
use crate::constants::LOG_BUFFER_CAPACITY;
use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Location of the log file, if a cache directory exists on this platform
pub fn get_log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("swipetodo").join("swipetodo.log"))
}

/// Install the global file logger described by `config`.
///
/// Returns the path of the log file, or `None` when logging is disabled.
pub fn setup_logging(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level_filter()?;
    let path = get_log_file_path().context("No cache directory available for the log file")?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .apply()
        .context("A global logger is already installed")?;

    log::info!("Logging to {}", path.display());
    Ok(Some(path))
}

/// Shared log of recent row events, shown in the status bar
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Add a log entry and forward it to the `log` facade
    pub fn log(&self, message: String) {
        log::info!("{}", message);
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= LOG_BUFFER_CAPACITY {
                logs.remove(0);
            }
            logs.push(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Most recent entry, if any
    pub fn latest(&self) -> Option<String> {
        self.logs.lock().ok().and_then(|logs| logs.last().cloned())
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
