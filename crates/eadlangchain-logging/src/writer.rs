//! Swappable output sinks.
//!
//! The subscriber is installed once per process, but its destinations change
//! on every `setup_logging` call. The fmt layer writes through a
//! [`SinkWriter`] that forwards each formatted line to whatever sinks are
//! current.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_appender::rolling::{Rotation, RollingFileAppender};
use tracing_subscriber::fmt::MakeWriter;

use crate::{LoggingError, Result};

/// How the log file is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRotation {
    /// Append to the given file forever.
    #[default]
    Never,
    /// One file per day, named `<file>.<YYYY-MM-DD>`.
    Daily,
}

/// The active set of destinations.
pub(crate) struct Sinks {
    pub(crate) console: bool,
    pub(crate) file: Option<Box<dyn Write + Send>>,
}

impl Sinks {
    pub(crate) fn console_only() -> Self {
        Self {
            console: true,
            file: None,
        }
    }

    /// Write to every sink; a failing sink does not starve the others.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.each(|sink| sink.write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.each(|sink| sink.flush())
    }

    fn each(&mut self, op: impl FnMut(&mut dyn Write) -> io::Result<()>) -> io::Result<()> {
        let mut stderr = io::stderr();
        let console = if self.console {
            Some(&mut stderr as &mut dyn Write)
        } else {
            None
        };
        let file = self.file.as_deref_mut().map(|f| f as &mut dyn Write);
        apply_all([console, file], op)
    }
}

/// Run `op` on every present sink, returning the first error.
fn apply_all<const N: usize>(
    sinks: [Option<&mut dyn Write>; N],
    mut op: impl FnMut(&mut dyn Write) -> io::Result<()>,
) -> io::Result<()> {
    let mut first_err = None;
    for sink in sinks.into_iter().flatten() {
        if let Err(e) = op(sink) {
            first_err.get_or_insert(e);
        }
    }
    first_err.map_or(Ok(()), Err)
}

/// `MakeWriter` over the shared sink set.
#[derive(Clone)]
pub(crate) struct SinkWriter {
    sinks: Arc<Mutex<Sinks>>,
}

impl SinkWriter {
    pub(crate) fn new(sinks: Arc<Mutex<Sinks>>) -> Self {
        Self { sinks }
    }
}

impl<'a> MakeWriter<'a> for SinkWriter {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sinks = self.sinks.lock();
        sinks.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sinks.lock().flush()
    }
}

/// Open the log file sink, creating parent directories as needed.
pub(crate) fn open_file_sink(path: &Path, rotation: LogRotation) -> Result<Box<dyn Write + Send>> {
    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(io_err)?;

    match rotation {
        LogRotation::Never => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(io_err)?;
            Ok(Box::new(file))
        }
        LogRotation::Daily => {
            let prefix = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "eadlangchain.log".to_string());
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .build(parent)?;
            Ok(Box::new(appender))
        }
    }
}
