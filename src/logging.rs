//! Tracing subscriber setup: timestamped lines to stdout and to a log file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name written inside the configured log directory.
pub const LOG_FILE_NAME: &str = "buzz.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Full path of the log file for `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

/// Install the global subscriber.
///
/// The level comes from `RUST_LOG` and defaults to `info`. The file layer
/// appends, so successive runs share one log.
pub fn init(dir: &Path) -> Result<PathBuf, LoggingError> {
    let path = log_file_path(dir);
    let io_error = |source| LoggingError::Io {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(io_error)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_dir() {
        assert_eq!(
            log_file_path(Path::new("logs")),
            PathBuf::from("logs").join("buzz.log")
        );
    }

    #[test]
    fn unwritable_dir_reports_path() {
        // A regular file cannot be used as a directory.
        let blocker = std::env::temp_dir().join(format!("buzz-log-blocker-{}", std::process::id()));
        fs::write(&blocker, b"not a dir").unwrap();

        let err = init(&blocker.join("nested")).unwrap_err();
        assert!(matches!(err, LoggingError::Io { .. }));
        assert!(err.to_string().contains("buzz.log"));

        fs::remove_file(&blocker).unwrap();
    }
}
