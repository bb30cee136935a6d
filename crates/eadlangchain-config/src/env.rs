//! `.env` discovery and loading.
//!
//! Search order when no explicit file is given:
//! 1. `./.env`
//! 2. `.env` in each ancestor directory, nearest first
//!
//! The first file found is applied. Variables already present in the process
//! environment are never overwritten, which makes loading idempotent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{ConfigError, ENV_PREFIX, Result};

/// Default env filename.
const ENV_FILE: &str = ".env";

/// Outcome of a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEnv {
    /// The `.env` file that was applied, if one was found.
    pub source: Option<PathBuf>,
    /// Every `EADLANGCHAIN_*` variable present after loading, sorted by name.
    pub entries: BTreeMap<String, String>,
}

impl LoadedEnv {
    /// Whether a variable is present under the namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Value of a namespaced variable, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

/// Discover and apply the nearest `.env`, starting from the working directory.
pub fn load_env_config() -> Result<LoadedEnv> {
    load_env_config_with_options(None, None)
}

/// Apply a specific `.env` file (no discovery). A missing file is an error.
pub fn load_env_config_from(path: &Path) -> Result<LoadedEnv> {
    load_env_config_with_options(Some(path), None)
}

/// Load with explicit control over the file and the search start directory.
///
/// `env_file` wins over discovery. `search_from` replaces the working
/// directory as the discovery starting point.
pub fn load_env_config_with_options(
    env_file: Option<&Path>,
    search_from: Option<&Path>,
) -> Result<LoadedEnv> {
    let source = match env_file {
        Some(path) => {
            apply_env_file(path)?;
            Some(path.to_path_buf())
        }
        None => {
            let start = match search_from {
                Some(dir) => dir.to_path_buf(),
                None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            };
            match find_env_file(&start) {
                Some(path) => {
                    apply_env_file(&path)?;
                    Some(path)
                }
                None => {
                    tracing::debug!(start = %start.display(), "no .env file found, using process environment");
                    None
                }
            }
        }
    };

    Ok(LoadedEnv {
        source,
        entries: namespaced_entries(),
    })
}

/// Find the nearest `.env` at or above `start`.
pub fn find_env_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(ENV_FILE))
        .find(|candidate| candidate.is_file())
}

/// Snapshot of every variable under the namespace prefix.
pub fn namespaced_entries() -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(name, _)| name.starts_with(ENV_PREFIX))
        .collect()
}

fn apply_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), "applied env file");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
