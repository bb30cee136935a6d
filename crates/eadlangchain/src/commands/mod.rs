//! CLI command handlers.

use std::path::PathBuf;

pub mod config;
pub mod sync;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Verbose output enabled.
    pub verbose: bool,
    /// `.env` file applied at startup, if any.
    pub env_file: Option<PathBuf>,
    /// Workspace root discovered from the working directory.
    pub project_root: PathBuf,
}
