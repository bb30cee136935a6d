//! Logging setup for EADLangChain projects.
//!
//! Installs a process-wide `tracing` subscriber whose lines carry the
//! caller's project-relative module path, function and line:
//!
//! ```text
//! INFO     2025-01-15 10:30:00 crates.app.src.main.run.42: Application started
//! ```
//!
//! Level and destinations come from arguments or from
//! `EADLANGCHAIN_LOG_LEVEL` / `EADLANGCHAIN_LOG_FILE`. Calling
//! [`setup_logging`] again reconfigures the same subscriber.
//!
//! ```no_run
//! use eadlangchain_logging::{get_logger, setup_logging};
//!
//! setup_logging(Some("DEBUG"), None)?;
//! let logger = get_logger(module_path!());
//! logger.info("Application started");
//! tracing::debug!(provider = "openai", "using structured fields");
//! # Ok::<(), eadlangchain_logging::LoggingError>(())
//! ```

pub mod error;
mod filter;
pub mod format;
pub mod level;
pub mod logger;
pub mod setup;
pub mod writer;

pub use error::{LoggingError, Result};
pub use format::{
    NO_FUNCTION, ProjectFormatter, TIMESTAMP_FORMAT, current_project_root, dotted_module_path,
    find_project_root,
};
pub use level::Severity;
pub use logger::{Logger, get_logger};
pub use setup::{
    LOG_FILE_VAR, LOG_LEVEL_VAR, LoggingConfig, is_initialized, setup_logging, setup_logging_with,
};
pub use writer::LogRotation;
