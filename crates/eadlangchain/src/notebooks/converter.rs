//! External notebook converter.
//!
//! Conversion itself belongs to the converter (jupytext by default); this
//! module only invokes it and reports failures.

use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result, bail};

/// Default converter program.
pub const DEFAULT_CONVERTER: &str = "jupytext";

/// Environment variable overriding the converter program.
pub const CONVERTER_VAR: &str = "EADLANGCHAIN_NOTEBOOK_CONVERTER";

/// Invokes `<program> --to notebook --output <notebook> <source>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Converter {
    program: String,
}

impl Converter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether `<program> --version` runs successfully.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .map(|out| out.status.success())
            .unwrap_or(false)
    }

    /// Convert `source` into `notebook`.
    pub fn convert(&self, source: &Path, notebook: &Path) -> Result<()> {
        tracing::debug!(
            program = %self.program,
            source = %source.display(),
            notebook = %notebook.display(),
            "running converter"
        );

        let output = Command::new(&self.program)
            .args(["--to", "notebook", "--output"])
            .arg(notebook)
            .arg(source)
            .output()
            .with_context(|| format!("failed to run {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }
        Ok(())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let converter = Converter::new("eadlangchain-no-such-converter");
        assert!(!converter.is_available());
    }

    #[test]
    fn test_missing_program_conversion_fails() {
        let converter = Converter::new("eadlangchain-no-such-converter");
        let err = converter
            .convert(Path::new("01_a.rs"), Path::new("01_a.ipynb"))
            .unwrap_err();
        assert!(err.to_string().contains("failed to run"));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(Converter::default().program(), "jupytext");
    }
}
