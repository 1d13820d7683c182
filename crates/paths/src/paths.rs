//! Directory and file locations for the parlor application.
//!
//! Resolution order for every directory: explicit environment override
//! (`PARLOR_DATA` / `PARLOR_CONFIG`), then the platform directory from the
//! `dirs` crate, then a dot-directory next to the working directory so the
//! application still works on platforms `dirs` does not know about.

use std::env;
use std::path::PathBuf;

pub const APP_ID: &str = "parlor";

/// Directory holding persistent application data (scores, logs).
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os("PARLOR_DATA") {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::data_local_dir() {
        return dir.join(APP_ID);
    }
    PathBuf::from(".").join(".data")
}

/// Directory holding user configuration files.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = env::var_os("PARLOR_CONFIG") {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::config_local_dir() {
        return dir.join(APP_ID);
    }
    PathBuf::from(".").join(".config")
}

/// Returns the logs directory path: `<data>/logs/`
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}

/// Returns the best-scores file path: `<data>/scores.json`
pub fn scores_file() -> PathBuf {
    data_dir().join("scores.json")
}

/// Returns a log file path with the given timestamp: `<data>/logs/<app>.<timestamp>.log`
pub fn log_file(timestamp: &str) -> PathBuf {
    logs_dir().join(format!("{}.{}.log", APP_ID, timestamp))
}

/// Returns a log file path with the current timestamp.
pub fn log_file_now() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    log_file(&timestamp)
}

/// Ensures the data, config and logs directories exist.
pub fn ensure_directories() -> std::io::Result<()> {
    for dir in [data_dir(), config_dir(), logs_dir()] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
    }
    Ok(())
}
