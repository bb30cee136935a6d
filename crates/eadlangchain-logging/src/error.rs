//! Logging setup error types.

use std::path::PathBuf;

/// Result type alias for logging setup.
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Errors that can occur while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Level name outside DEBUG/INFO/WARNING/ERROR/CRITICAL.
    #[error("invalid log level '{0}' (expected DEBUG, INFO, WARNING, ERROR or CRITICAL)")]
    InvalidLevel(String),

    /// Log file or its directory could not be created or opened.
    #[error("failed to open log file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Rolling file appender failed to initialize.
    #[error("failed to initialize rolling log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    /// A different global subscriber was installed before ours.
    #[error("another global tracing subscriber is already installed")]
    SubscriberConflict,
}
