//! Logging initialization for docflow.
//!
//! File mode: logs to `{log_dir}/docflow-{datetime}.log`
//! Otherwise: logs to stderr

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Result of logging initialization
pub struct LoggingHandle {
    /// Guard that must be kept alive for the duration of the program.
    /// When dropped, ensures all buffered logs are flushed.
    pub _guard: Option<WorkerGuard>,

    /// Path to the log file (only set with file logging enabled)
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging from configuration.
///
/// `log_dir` is used only when `config.logging.to_file` is set; stderr
/// logging needs no directory. RUST_LOG overrides the configured level.
///
/// Returns a `LoggingHandle` that must be kept alive for the duration of
/// the program.
pub fn init_logging(config: &Config, log_dir: Option<&Path>) -> Result<LoggingHandle> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    );

    match log_dir {
        Some(logs_dir) if config.logging.to_file => {
            std::fs::create_dir_all(logs_dir)?;

            // Generate log filename with ISO8601 timestamp
            let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
            let log_filename = format!("docflow-{timestamp}.log");
            let log_file_path = logs_dir.join(&log_filename);

            let file_appender = tracing_appender::rolling::never(logs_dir, &log_filename);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false) // No ANSI codes in log files
                        .with_writer(non_blocking),
                )
                .init();

            Ok(LoggingHandle {
                _guard: Some(guard),
                log_file_path: Some(log_file_path),
            })
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();

            Ok(LoggingHandle {
                _guard: None,
                log_file_path: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_path_format() {
        let temp_dir = TempDir::new().unwrap();
        let logs_dir = temp_dir.path().join("logs");
        std::fs::create_dir_all(&logs_dir).unwrap();

        let timestamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
        let log_filename = format!("docflow-{timestamp}.log");
        let log_file_path = logs_dir.join(&log_filename);

        assert!(log_file_path.to_string_lossy().contains("docflow-"));
        assert!(log_file_path.to_string_lossy().ends_with(".log"));
    }

    #[test]
    fn test_stderr_mode_needs_no_dir() {
        // With to_file disabled the log_dir is ignored entirely
        let config = Config::default();
        assert!(!config.logging.to_file);
    }
}
