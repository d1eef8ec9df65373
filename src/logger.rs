use anyhow::{Context, Result};
use chrono::Utc;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Entries kept in memory for the logs dialog
const MAX_MEMORY_ENTRIES: usize = 1000;

/// Shared logger that can be used across the application
///
/// Every record goes to an in-memory buffer shown by the logs dialog. When
/// file logging is enabled the same records are appended to the log file.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    file_path: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            file_path: None,
        }
    }

    /// Build a logger from the `logging.enabled` setting
    pub fn from_config(enabled: bool) -> Result<Self> {
        if !enabled {
            return Ok(Self::new());
        }
        Self::with_file(Self::get_log_file_path()?)
    }

    /// Build a logger that also writes to `path`
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        Ok(Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            file_path: Some(path),
        })
    }

    /// Default location of the log file
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("coursedeck").join("coursedeck.log"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    pub fn is_enabled(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            logs.push(formatted_message);
            if logs.len() > MAX_MEMORY_ENTRIES {
                let overflow = logs.len() - MAX_MEMORY_ENTRIES;
                logs.drain(..overflow);
            }
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Build the `fern` dispatch feeding this logger and, if enabled, the log file
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let memory = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .level(LevelFilter::Info)
            .level_for("coursedeck", LevelFilter::Debug)
            .chain(fern::Output::call(move |record| {
                memory.log(format!("{} {}", record.level(), record.args()));
            }));

        if let Some(path) = &self.file_path {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "{} {:<5} [{}] {}",
                            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        Ok(dispatch)
    }

    /// Install this logger as the global `log` backend
    pub fn install(&self) -> Result<()> {
        self.dispatch()?.apply().context("Failed to install logger")
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
