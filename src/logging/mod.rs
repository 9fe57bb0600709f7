//! Diagnostic logging to disk.
//!
//! The terminal is owned by the UI, so `tracing` output is written to
//! `gesturedeck.<date>.log` in the configured log directory (default:
//! `~/.local/share/gesturedeck/logs/`). The file rolls over at midnight UTC.
//! The level comes from the config and can be overridden with `RUST_LOG`.

use crate::config::LoggingConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const FILE_PREFIX: &str = "gesturedeck";
const FILE_SUFFIX: &str = "log";

/// Expand a leading `~` to the user's home directory.
pub fn expand_log_dir(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if dir == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(dir)
}

/// The file the appender is writing to right now.
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    let date = chrono::Utc::now().format("%Y-%m-%d");
    log_dir.join(format!("{}.{}.{}", FILE_PREFIX, date, FILE_SUFFIX))
}

fn daily_appender(log_dir: &Path) -> Option<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(FILE_PREFIX)
        .filename_suffix(FILE_SUFFIX)
        .build(log_dir)
        .ok()
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled or the file cannot be opened.
pub fn init(config: &LoggingConfig) -> Option<PathBuf> {
    if !config.enabled {
        return None;
    }

    let log_dir = expand_log_dir(&config.log_dir);
    if fs::create_dir_all(&log_dir).is_err() {
        return None;
    }
    let appender = daily_appender(&log_dir)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gesturedeck={}", config.level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .try_init();

    Some(log_file_path(&log_dir))
}
