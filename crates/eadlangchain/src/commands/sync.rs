//! Sync-notebooks command - regenerate notebooks from example programs.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;
use console::Style;

use crate::notebooks::{
    CONVERTER_VAR, Converter, DEFAULT_CONVERTER, EnhanceOptions, ExampleFile, SyncStatus,
    enhance_notebook, find_example_files,
};

use super::Context;

/// Examples directory relative to the project root.
const DEFAULT_EXAMPLES_DIR: &str = "crates/eadlangchain/examples";

const RULE_WIDTH: usize = 80;

/// Arguments for the sync-notebooks command.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Only report which notebooks are out of sync; write nothing
    #[arg(long)]
    pub check: bool,

    /// Convert every example, even when its notebook is up to date
    #[arg(long, conflicts_with = "check")]
    pub force: bool,

    /// Skip notebook enhancement (plain conversion only)
    #[arg(long)]
    pub simple: bool,

    /// Do not add "Try This" exercise cells
    #[arg(long)]
    pub no_exercises: bool,

    /// Directory containing NN_*.rs example programs
    #[arg(long, value_name = "DIR")]
    pub examples_dir: Option<PathBuf>,

    /// Converter program invoked as `<CMD> --to notebook --output <ipynb> <source>`
    #[arg(long, value_name = "CMD", env = CONVERTER_VAR, default_value = DEFAULT_CONVERTER)]
    pub converter: String,
}

impl SyncArgs {
    fn mode(&self) -> &'static str {
        if self.check {
            "check"
        } else if self.simple {
            "simple"
        } else if self.no_exercises {
            "enhanced, no exercises"
        } else {
            "enhanced"
        }
    }
}

/// Run the sync-notebooks command.
pub fn run(args: SyncArgs, ctx: &Context) -> Result<()> {
    let examples_dir = args
        .examples_dir
        .clone()
        .unwrap_or_else(|| ctx.project_root.join(DEFAULT_EXAMPLES_DIR));

    let bold = Style::new().bold();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "{}",
        bold.apply_to(format!("Example File Sync: .rs → .ipynb ({})", args.mode()))
    );
    println!("{}", "=".repeat(RULE_WIDTH));
    println!();

    let examples = find_example_files(&examples_dir)?;
    if examples.is_empty() {
        println!("No example files found in {}", examples_dir.display());
        return Ok(());
    }
    tracing::debug!(dir = %examples_dir.display(), count = examples.len(), "found example files");

    if args.check {
        check(&examples)
    } else {
        convert(&args, &examples, ctx)
    }
}

fn check(examples: &[ExampleFile]) -> Result<()> {
    let green = Style::new().green();
    let yellow = Style::new().yellow();

    let mut stale = 0;
    for example in examples {
        match example.status()? {
            SyncStatus::UpToDate => {
                println!("  {} {}", green.apply_to("[OK]"), example.source_name());
            }
            status => {
                stale += 1;
                println!(
                    "  {} {} ({})",
                    yellow.apply_to("[SKIP]"),
                    example.source_name(),
                    status.label()
                );
            }
        }
    }

    println!();
    if stale > 0 {
        bail!(
            "{} notebook(s) out of sync; run `eadlangchain sync-notebooks` to update",
            stale
        );
    }
    println!("All {} notebook(s) up to date.", examples.len());
    Ok(())
}

fn convert(args: &SyncArgs, examples: &[ExampleFile], ctx: &Context) -> Result<()> {
    let green = Style::new().green();
    let red = Style::new().red();
    let yellow = Style::new().yellow();
    let dim = Style::new().dim();

    let converter = Converter::new(args.converter.clone());
    if !converter.is_available() {
        bail!(
            "notebook converter '{}' not found. Install it with `pip install jupytext` or set {}",
            converter.program(),
            CONVERTER_VAR
        );
    }

    let options = EnhanceOptions {
        exercises: !args.no_exercises,
    };

    let mut converted = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for example in examples {
        if !args.force && example.status()? == SyncStatus::UpToDate {
            skipped += 1;
            if ctx.verbose {
                println!(
                    "  {} {} {}",
                    dim.apply_to("[OK]"),
                    example.source_name(),
                    dim.apply_to("(up to date)")
                );
            }
            continue;
        }

        if let Err(e) = converter.convert(&example.source, &example.notebook) {
            failed += 1;
            tracing::error!(source = %example.source.display(), error = %e, "conversion failed");
            println!("  {} {}: {}", red.apply_to("[FAIL]"), example.source_name(), e);
            continue;
        }

        if !args.simple {
            match enhance_notebook(&example.notebook, options) {
                Ok(summary) => {
                    tracing::debug!(
                        notebook = %example.notebook.display(),
                        descriptions = summary.formatted_descriptions,
                        exercises = summary.exercises.len(),
                        "enhanced notebook"
                    );
                }
                Err(e) => {
                    tracing::warn!(notebook = %example.notebook.display(), error = %e, "enhancement failed");
                    println!(
                        "  {} could not enhance {}: {}",
                        yellow.apply_to("⚠"),
                        example.notebook_name(),
                        e
                    );
                }
            }
        }

        converted += 1;
        println!(
            "  {} {} → {}",
            green.apply_to("[OK]"),
            example.source_name(),
            example.notebook_name()
        );
    }

    println!();
    println!(
        "Converted: {}  Up to date: {}  Failed: {}",
        converted, skipped, failed
    );

    if failed > 0 {
        bail!("{} conversion(s) failed", failed);
    }
    Ok(())
}
