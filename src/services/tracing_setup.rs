//! Tracing subscriber setup
//!
//! File-based logging only: while the terminal UI is active, stdout and
//! stderr belong to ratatui, so diagnostics go to a log file under the
//! state directory (see [`super::log_dirs`]).

use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber with file logging.
///
/// Filtering follows `RUST_LOG` with an INFO default. Returns false if
/// the log file could not be created; the app keeps running unlogged.
pub fn init_global(log_file_path: &Path) -> bool {
    let Ok(log_file) = File::create(log_file_path) else {
        return false;
    };

    build_subscriber(log_file).init();
    true
}

/// Build a subscriber with file logging.
///
/// This is the core subscriber configuration shared between production
/// and tests.
pub fn build_subscriber(log_file: File) -> impl tracing::Subscriber + Send + Sync {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer().with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_subscriber_writes_to_file() {
        let log_file = NamedTempFile::new().unwrap();
        let subscriber = build_subscriber(log_file.reopen().unwrap());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("Test warning message");
        });

        let contents = std::fs::read_to_string(log_file.path()).expect("Failed to read log");
        assert!(contents.contains("WARN"), "Log should contain WARN level");
        assert!(
            contents.contains("Test warning message"),
            "Log should contain message"
        );
    }

    #[test]
    fn test_init_global_fails_on_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("missing-subdir").join("folio.log");
        assert!(!init_global(&bad));
    }
}
