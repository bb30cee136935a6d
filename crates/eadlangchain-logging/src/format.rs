//! Event formatter that renders project-relative caller context.
//!
//! Line layout:
//!
//! ```text
//! INFO     2025-01-15 10:30:00 crates.app.src.main.run.42: Application started
//! ```
//!
//! - level, left-aligned in 8 columns
//! - local timestamp, `%Y-%m-%d %H:%M:%S`
//! - caller file relative to the project root, separators as dots, `.rs` stripped
//! - innermost span name (the function under `#[instrument]`), `<module>` outside spans
//! - line number
//! - message, then any other fields as `key=value`

use std::fmt::{self, Write as _};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::level::level_label;

/// Timestamp layout.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Function segment used for events outside any span.
pub const NO_FUNCTION: &str = "<module>";

/// Field carrying the caller's file for records emitted through [`crate::Logger`].
pub(crate) const FILE_FIELD: &str = "log.file";
/// Field carrying the caller's line for records emitted through [`crate::Logger`].
pub(crate) const LINE_FIELD: &str = "log.line";
/// Field carrying the logger name.
pub(crate) const TARGET_FIELD: &str = "log.target";
/// Field marking a record as critical.
pub(crate) const CRITICAL_FIELD: &str = "critical";

// ─────────────────────────────────────────────────────────────────────────────
// Formatter
// ─────────────────────────────────────────────────────────────────────────────

/// `tracing_subscriber` event formatter with project-relative caller context.
#[derive(Debug, Clone)]
pub struct ProjectFormatter {
    root: Arc<RwLock<PathBuf>>,
}

impl ProjectFormatter {
    /// Formatter resolving paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(RwLock::new(root.into())),
        }
    }

    /// Formatter whose root is shared with the process-wide logging state.
    pub(crate) fn with_shared_root(root: Arc<RwLock<PathBuf>>) -> Self {
        Self { root }
    }

    pub fn project_root(&self) -> PathBuf {
        self.root.read().clone()
    }
}

impl<S, N> FormatEvent<S, N> for ProjectFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        let mut fields = EventFields::default();
        event.record(&mut fields);

        let label = if fields.critical {
            "CRITICAL"
        } else {
            level_label(meta.level())
        };

        let file = fields.file.as_deref().or(meta.file());
        let line = fields.line.or(meta.line()).unwrap_or(0);

        let module = {
            let root = self.root.read();
            file.and_then(|f| dotted_module_path(f, &root))
        }
        .unwrap_or_else(|| {
            let fallback = fields
                .target
                .as_deref()
                .or(meta.module_path())
                .unwrap_or(meta.target());
            fallback.replace("::", ".")
        });

        let function = ctx
            .lookup_current()
            .map(|span| span.name())
            .unwrap_or(NO_FUNCTION);

        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);

        write!(
            writer,
            "{:<8} {} {}.{}.{}: {}",
            label, timestamp, module, function, line, fields.message
        )?;
        for (name, value) in &fields.extra {
            write!(writer, " {}={}", name, value)?;
        }
        writeln!(writer)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Field extraction
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct EventFields {
    message: String,
    file: Option<String>,
    line: Option<u32>,
    target: Option<String>,
    critical: bool,
    extra: Vec<(&'static str, String)>,
}

impl Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            FILE_FIELD => self.file = Some(value.to_string()),
            TARGET_FIELD => self.target = Some(value.to_string()),
            "log.module_path" => {}
            name => self.extra.push((name, value.to_string())),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            LINE_FIELD => self.line = u32::try_from(value).ok(),
            name => self.extra.push((name, value.to_string())),
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            CRITICAL_FIELD => self.critical = value,
            name => self.extra.push((name, value.to_string())),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => {
                self.message.clear();
                let _ = write!(self.message, "{:?}", value);
            }
            "log.module_path" => {}
            name => self.extra.push((name, format!("{:?}", value))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Paths
// ─────────────────────────────────────────────────────────────────────────────

/// Dotted module path for `file` relative to `root`.
///
/// Relative paths (what `file!()` yields inside a workspace) are taken as
/// already relative to the root. Absolute paths outside the root, and
/// relative paths climbing out of it with `..`, yield `None`.
pub fn dotted_module_path(file: &str, root: &Path) -> Option<String> {
    let path = Path::new(file);
    let relative = if path.is_absolute() {
        path.strip_prefix(root).ok()?
    } else {
        path
    };

    let relative = match relative.extension() {
        Some(ext) if ext == "rs" => relative.with_extension(""),
        _ => relative.to_path_buf(),
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            // `..` leaves the root.
            Component::ParentDir => return None,
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

/// Nearest ancestor of `start` that holds a `.git` directory or a workspace
/// `Cargo.toml`. Falls back to `start` itself.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists() || is_workspace_manifest(&dir.join("Cargo.toml")))
        .unwrap_or(start)
        .to_path_buf()
}

/// Project root discovered from the working directory.
pub fn current_project_root() -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_project_root(&cwd)
}

fn is_workspace_manifest(path: &Path) -> bool {
    std::fs::read_to_string(path)
        .map(|contents| contents.lines().any(|l| l.trim() == "[workspace]"))
        .unwrap_or(false)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
