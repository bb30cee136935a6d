// %% [markdown]
// # Example 02: Logging
//
// Shows:
// - Setting up logging with a level and an optional file
// - Named loggers
// - Instrumented functions and structured fields
// - Reconfiguring at runtime
//
// ```text
// cargo run -p eadlangchain --example logging
// ```

// %%
use std::path::PathBuf;

use eadlangchain_logging::{Severity, get_logger, setup_logging};
use tracing::instrument;

// %% [markdown]
// ## Setup
//
// Without arguments the level comes from `EADLANGCHAIN_LOG_LEVEL` (default
// `INFO`) and the file from `EADLANGCHAIN_LOG_FILE`.

// %%
fn configure_logging() -> anyhow::Result<()> {
    setup_logging(Some("DEBUG"), None)?;
    tracing::info!("logging configured");
    tracing::debug!(threshold = "DEBUG", "debug messages are visible");
    Ok(())
}

// %% [markdown]
// ## Named loggers
//
// `get_logger` returns a handle whose lines point at the call site.

// %%
fn named_logger() {
    let logger = get_logger("examples.logging");
    logger.info("hello from a named logger");
    logger.warning("warnings render as WARNING");
    logger.log(Severity::Critical, "critical filters like ERROR");
}

// %% [markdown]
// ## Instrumented functions
//
// The function segment of each line is the innermost span, so
// `#[instrument]` names it.

// %%
#[instrument]
fn summarize(provider: &str, tokens: u32) -> u32 {
    tracing::info!(tokens, "summarizing");
    tokens / 2
}

// %% [markdown]
// ## Reconfiguration
//
// The last call wins: raising the level hides debug output and a log file
// starts receiving every line from then on.

// %%
fn reconfigure() -> anyhow::Result<()> {
    let log_file = std::env::temp_dir().join("eadlangchain-example.log");
    setup_logging(Some("WARNING"), Some(&log_file))?;
    tracing::debug!("not shown");
    tracing::warn!(file = %log_file.display(), "now also written to the file");
    print_log(log_file);
    Ok(())
}

fn print_log(path: PathBuf) {
    if let Ok(contents) = std::fs::read_to_string(&path) {
        println!("--- {} ---\n{}", path.display(), contents);
    }
}

// %%
fn main() -> anyhow::Result<()> {
    configure_logging()?;
    named_logger();
    summarize("openai", 128);
    reconfigure()
}
