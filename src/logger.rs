use crate::config::LoggingConfig;
use crate::constants::{LOG_BUFFER_CAPACITY, LOG_FILE_NAME};
use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Application logger built on `fern`.
///
/// Every record goes to an in-memory buffer (shown in the log overlay) and,
/// when file logging is enabled, to a log file in the user data directory.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    level: log::LevelFilter,
    file_path: Option<PathBuf>,
}

impl Logger {
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let file_path = if config.enabled {
            Some(Self::get_log_file_path()?)
        } else {
            None
        };

        Ok(Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(LOG_BUFFER_CAPACITY))),
            level: config.level_filter()?,
            file_path,
        })
    }

    pub fn is_file_enabled(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Build the dispatch chain feeding the buffer and the optional file.
    pub fn dispatch(&self) -> Result<fern::Dispatch> {
        let buffer = Arc::clone(&self.logs);

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .chain(fern::Output::call(move |record| {
                push_line(&buffer, record.args().to_string());
            }));

        if let Some(path) = &self.file_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file =
                fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install as the global `log` backend. Can only succeed once per process.
    pub fn install(&self) -> Result<()> {
        self.dispatch()?.apply().context("Failed to install logger")?;
        Ok(())
    }

    /// Get all buffered lines (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("matterlist").join(LOG_FILE_NAME))
    }
}

fn push_line(buffer: &Mutex<VecDeque<String>>, line: String) {
    if let Ok(mut logs) = buffer.lock() {
        if logs.len() == LOG_BUFFER_CAPACITY {
            logs.pop_front();
        }
        logs.push_back(line);
    }
}
