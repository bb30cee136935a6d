//! Process-wide logging state.
//!
//! The first successful `setup_logging*` call installs a global subscriber
//! (registry + threshold filter + fmt layer using [`ProjectFormatter`]).
//! Later calls keep that subscriber and swap its threshold, sinks and project
//! root in place, so the last call wins.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};
use tracing_subscriber::prelude::*;

use crate::filter::ThresholdFilter;
use crate::format::{ProjectFormatter, current_project_root};
use crate::writer::{LogRotation, SinkWriter, Sinks, open_file_sink};
use crate::{LoggingError, Result, Severity};

/// Log threshold variable.
pub const LOG_LEVEL_VAR: &str = "EADLANGCHAIN_LOG_LEVEL";

/// Log file variable.
pub const LOG_FILE_VAR: &str = "EADLANGCHAIN_LOG_FILE";

/// Everything `setup_logging_with` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Severity,
    /// Also write to this file when set.
    pub log_file: Option<PathBuf>,
    /// Write to stderr.
    pub console: bool,
    pub rotation: LogRotation,
    /// Root for module paths; discovered from the working directory when unset.
    pub project_root: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Severity::Info,
            log_file: None,
            console: true,
            rotation: LogRotation::Never,
            project_root: None,
        }
    }
}

impl LoggingConfig {
    /// Defaults overlaid with `EADLANGCHAIN_LOG_LEVEL` and `EADLANGCHAIN_LOG_FILE`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            level: env_level()?,
            log_file: env_log_file(),
            ..Self::default()
        })
    }

    pub fn with_level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    pub fn with_rotation(mut self, rotation: LogRotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }
}

struct LoggingState {
    threshold: Arc<RwLock<Severity>>,
    sinks: Arc<Mutex<Sinks>>,
    root: Arc<RwLock<PathBuf>>,
}

static STATE: OnceLock<LoggingState> = OnceLock::new();

/// Configure logging with a level name and optional file.
///
/// `None` arguments fall back to `EADLANGCHAIN_LOG_LEVEL` (default `INFO`)
/// and `EADLANGCHAIN_LOG_FILE`. A variable is only read when its argument is
/// `None`.
pub fn setup_logging(level: Option<&str>, log_file: Option<&Path>) -> Result<()> {
    let level = match level {
        Some(level) => level.parse()?,
        None => env_level()?,
    };
    let log_file = match log_file {
        Some(path) => Some(path.to_path_buf()),
        None => env_log_file(),
    };
    setup_logging_with(LoggingConfig {
        level,
        log_file,
        ..LoggingConfig::default()
    })
}

/// Configure logging from a full [`LoggingConfig`].
///
/// The file sink is opened before anything changes, so a failure leaves the
/// previous configuration in place.
pub fn setup_logging_with(config: LoggingConfig) -> Result<()> {
    let file = config
        .log_file
        .as_deref()
        .map(|path| open_file_sink(path, config.rotation))
        .transpose()?;

    let state = state()?;
    *state.threshold.write() = config.level;
    *state.sinks.lock() = Sinks {
        console: config.console,
        file,
    };
    *state.root.write() = config
        .project_root
        .clone()
        .unwrap_or_else(current_project_root);

    tracing::debug!(
        level = %config.level,
        log_file = ?config.log_file,
        console = config.console,
        "logging configured"
    );
    Ok(())
}

/// Whether a global subscriber from this crate is installed.
pub fn is_initialized() -> bool {
    STATE.get().is_some()
}

fn state() -> Result<&'static LoggingState> {
    if let Some(state) = STATE.get() {
        return Ok(state);
    }
    let state = install()?;
    Ok(STATE.get_or_init(|| state))
}

fn install() -> Result<LoggingState> {
    let threshold = Arc::new(RwLock::new(Severity::Info));
    let sinks = Arc::new(Mutex::new(Sinks::console_only()));
    let root = Arc::new(RwLock::new(current_project_root()));

    tracing_subscriber::registry()
        .with(ThresholdFilter::new(threshold.clone()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .event_format(ProjectFormatter::with_shared_root(root.clone()))
                .with_writer(SinkWriter::new(sinks.clone())),
        )
        .try_init()
        .map_err(|_| LoggingError::SubscriberConflict)?;

    Ok(LoggingState {
        threshold,
        sinks,
        root,
    })
}

fn env_level() -> Result<Severity> {
    non_empty_var(LOG_LEVEL_VAR).map_or(Ok(Severity::Info), |level| level.parse())
}

fn env_log_file() -> Option<PathBuf> {
    non_empty_var(LOG_FILE_VAR).map(PathBuf::from)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            std::env::remove_var(LOG_LEVEL_VAR);
            std::env::remove_var(LOG_FILE_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear();
        let config = LoggingConfig::from_env().unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level, Severity::Info);
        assert!(config.console);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_variables() {
        clear();
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            std::env::set_var(LOG_LEVEL_VAR, "warning");
            std::env::set_var(LOG_FILE_VAR, "/tmp/eadlangchain-test.log");
        }

        let config = LoggingConfig::from_env().unwrap();
        assert_eq!(config.level, Severity::Warning);
        assert_eq!(
            config.log_file.as_deref(),
            Some(Path::new("/tmp/eadlangchain-test.log"))
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_level() {
        clear();
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe { std::env::set_var(LOG_LEVEL_VAR, "LOUD") };

        let err = LoggingConfig::from_env().unwrap_err();
        assert!(matches!(err, LoggingError::InvalidLevel(_)));
        clear();
    }

    #[test]
    fn test_builder() {
        let config = LoggingConfig::default()
            .with_level(Severity::Debug)
            .with_log_file("logs/app.log")
            .with_console(false)
            .with_rotation(LogRotation::Daily)
            .with_project_root("/project");
        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("logs/app.log")));
        assert!(!config.console);
        assert_eq!(config.rotation, LogRotation::Daily);
        assert_eq!(config.project_root, Some(PathBuf::from("/project")));
    }
}
