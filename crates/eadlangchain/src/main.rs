//! EADLangChain project tooling.
//!
//! Main entry point for the `eadlangchain` CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod notebooks;

use commands::{config, sync};
use eadlangchain_logging::{LoggingConfig, Severity};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// EADLangChain - project tooling for LangChain-based applications
#[derive(Parser)]
#[command(name = "eadlangchain")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (DEBUG logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert numbered example programs to notebooks
    SyncNotebooks(sync::SyncArgs),

    /// Inspect and validate provider configuration
    Config(config::ConfigArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env first, so EADLANGCHAIN_LOG_* from the file apply to logging
    let loaded = eadlangchain_config::load_env_config()?;

    let mut logging = LoggingConfig::from_env()?;
    if cli.verbose {
        logging.level = Severity::Debug;
    }
    eadlangchain_logging::setup_logging_with(logging)?;

    tracing::debug!(env_file = ?loaded.source, entries = loaded.entries.len(), "environment loaded");

    let ctx = commands::Context {
        verbose: cli.verbose,
        env_file: loaded.source,
        project_root: eadlangchain_logging::current_project_root(),
    };

    match cli.command {
        Commands::SyncNotebooks(args) => sync::run(args, &ctx),
        Commands::Config(args) => config::run(args, &ctx),
    }
}
