//! XDG-compliant log directory management
//!
//! Logs are stored under `$XDG_STATE_HOME/folio/logs/` (typically
//! `~/.local/state/folio/logs/`). Each folio instance uses a PID-based
//! log file to support concurrent runs; stale files from old runs are
//! cleaned up on startup.

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached log directory path
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base log directory for folio, creating it if necessary.
///
/// Returns `$XDG_STATE_HOME/folio/logs/`, falling back to
/// `~/.local/state/folio/logs/` and as a last resort the system temp dir.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let dir = get_xdg_log_dir().unwrap_or_else(|| std::env::temp_dir().join("folio-logs"));

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return std::env::temp_dir().join("folio-logs");
        }

        dir
    })
}

/// Get the XDG state home log directory
fn get_xdg_log_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path.join("folio").join("logs"));
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let home = PathBuf::from(home);
        return Some(home.join(".local").join("state").join("folio").join("logs"));
    }

    None
}

/// Get the path for the main folio log file for this process.
///
/// Returns `{log_dir}/folio-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(format!("folio-{}.log", std::process::id()))
}

/// Clean up stale PID-based log files left behind by earlier runs.
///
/// Removes `*.log` files in the log directory that belong to another PID
/// and have not been modified for at least [`CLEANUP_AGE`].
pub fn cleanup_stale_logs() {
    let current_pid = std::process::id();

    let Ok(entries) = fs::read_dir(log_dir()) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if !name.ends_with(".log") {
            continue;
        }

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };
        if pid == current_pid {
            continue;
        }

        if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && is_file_older_than(&entry.path(), CLEANUP_AGE)
        {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

/// Check if a file is older than the specified duration
fn is_file_older_than(path: &std::path::Path, age: Duration) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    let Ok(modified) = metadata.modified() else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// Extract PID from a filename like "folio-12345.log"
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    let without_ext = name.strip_suffix(".log")?;
    let last_hyphen = without_ext.rfind('-')?;
    without_ext[last_hyphen + 1..].parse().ok()
}
