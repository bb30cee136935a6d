//! Named loggers.

use std::fmt::Display;
use std::panic::Location;
use std::sync::Arc;

use crate::Severity;

/// Logger bound to a name, typically `module_path!()`.
///
/// Records carry the caller's file and line, so the process-wide formatter
/// attributes them to the call site rather than to this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logger {
    name: Arc<str>,
}

/// Logger bound to `name`.
pub fn get_logger(name: &str) -> Logger {
    Logger { name: name.into() }
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[track_caller]
    pub fn debug(&self, message: impl Display) {
        self.emit(Severity::Debug, &message, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Display) {
        self.emit(Severity::Info, &message, Location::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl Display) {
        self.emit(Severity::Warning, &message, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl Display) {
        self.emit(Severity::Error, &message, Location::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl Display) {
        self.emit(Severity::Critical, &message, Location::caller());
    }

    /// Emit at a runtime-chosen severity.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Display) {
        self.emit(severity, &message, Location::caller());
    }

    fn emit(&self, severity: Severity, message: &dyn Display, caller: &Location<'_>) {
        let target: &str = &self.name;
        let file = caller.file();
        let line = caller.line();
        match severity {
            Severity::Debug => tracing::debug!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                message
            ),
            Severity::Info => tracing::info!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                message
            ),
            Severity::Warning => tracing::warn!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                message
            ),
            Severity::Error => tracing::error!(
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                message
            ),
            Severity::Critical => tracing::error!(
                critical = true,
                log.target = target,
                log.file = file,
                log.line = line,
                "{}",
                message
            ),
        }
    }
}
