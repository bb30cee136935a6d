//! Example program discovery and sync status.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result, bail};

/// Extension of example sources.
const SOURCE_EXT: &str = "rs";

/// Extension of generated notebooks.
const NOTEBOOK_EXT: &str = "ipynb";

/// Sync state of one example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Notebook is at least as new as its source.
    UpToDate,
    /// Notebook exists but is older than its source.
    OutOfSync,
    /// No notebook yet.
    Missing,
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::UpToDate => "up to date",
            SyncStatus::OutOfSync => "out of sync",
            SyncStatus::Missing => "missing",
        }
    }
}

/// An example source and the notebook generated from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFile {
    pub source: PathBuf,
    pub notebook: PathBuf,
}

impl ExampleFile {
    pub fn new(source: PathBuf) -> Self {
        let notebook = source.with_extension(NOTEBOOK_EXT);
        Self { source, notebook }
    }

    /// File name of the source, for display.
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }

    /// File name of the notebook, for display.
    pub fn notebook_name(&self) -> String {
        file_name(&self.notebook)
    }

    /// Compare modification times of source and notebook.
    pub fn status(&self) -> Result<SyncStatus> {
        if !self.notebook.exists() {
            return Ok(SyncStatus::Missing);
        }
        let source_time = modified(&self.source)?;
        let notebook_time = modified(&self.notebook)?;
        if notebook_time >= source_time {
            Ok(SyncStatus::UpToDate)
        } else {
            Ok(SyncStatus::OutOfSync)
        }
    }
}

/// Whether `name` looks like `NN_<anything>.rs`.
pub fn is_example_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 3
        && bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'_'
        && Path::new(name).extension().is_some_and(|ext| ext == SOURCE_EXT)
}

/// All example programs in `dir`, sorted by file name.
pub fn find_example_files(dir: &Path) -> Result<Vec<ExampleFile>> {
    if !dir.is_dir() {
        bail!("examples directory not found: {}", dir.display());
    }

    let mut sources: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_example_name)
        })
        .collect();
    sources.sort();

    Ok(sources.into_iter().map(ExampleFile::new).collect())
}

fn modified(path: &Path) -> Result<std::time::SystemTime> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .with_context(|| format!("failed to read modification time of {}", path.display()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
