//! Config command - inspect and validate provider configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use serde::Serialize;

use eadlangchain_config::{Provider, ResolvedConfig};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show every provider's key status and model, plus log settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify that API keys are configured
    Check {
        /// Provider names: openai, anthropic, gemini (default: all)
        providers: Vec<String>,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show { json } => cmd_show(json, ctx),
        ConfigCommand::Check { providers } => cmd_check(&providers),
    }
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    env_file: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    providers: Vec<ProviderOutput>,
}

#[derive(Debug, Serialize)]
struct ProviderOutput {
    provider: Provider,
    api_key_var: &'static str,
    api_key: Option<String>,
    model: String,
    model_is_default: bool,
}

fn cmd_show(json: bool, ctx: &Context) -> Result<()> {
    let config = ResolvedConfig::from_env();

    if json {
        let output = ShowOutput {
            env_file: ctx.env_file.as_ref().map(|p| p.display().to_string()),
            log_level: config.log_level.clone(),
            log_file: config.log_file.as_ref().map(|p| p.display().to_string()),
            providers: config
                .iter()
                .map(|s| ProviderOutput {
                    provider: s.provider,
                    api_key_var: s.provider.api_key_var(),
                    api_key: s.api_key.as_ref().map(|k| k.masked()),
                    model: s.model.clone(),
                    model_is_default: !s.model_configured,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    let green = Style::new().green();
    let yellow = Style::new().yellow();

    println!("# EADLangChain Configuration\n");

    match &ctx.env_file {
        Some(path) => println!(".env: {}\n", path.display()),
        None => println!(".env: {}\n", dim.apply_to("not found (using process environment)")),
    }

    println!("Providers:");
    for settings in config.iter() {
        let key = match &settings.api_key {
            Some(key) => green.apply_to(key.masked()).to_string(),
            None => yellow.apply_to("(no key)").to_string(),
        };
        let default_marker = if settings.model_configured {
            String::new()
        } else {
            format!(" {}", dim.apply_to("(default)"))
        };
        println!(
            "  {:<10} {:<12} {}{}",
            settings.provider.as_str(),
            key,
            settings.model,
            default_marker
        );
        if ctx.verbose {
            println!(
                "  {:<10} {}",
                "",
                dim.apply_to(format!(
                    "{} / {}",
                    settings.provider.api_key_var(),
                    settings.provider.model_var()
                ))
            );
        }
    }
    println!();

    println!("Logging:");
    println!(
        "  level: {}",
        config.log_level.as_deref().unwrap_or("INFO (default)")
    );
    match &config.log_file {
        Some(path) => println!("  file:  {}", path.display()),
        None => println!("  file:  {}", dim.apply_to("(console only)")),
    }

    Ok(())
}

fn cmd_check(names: &[String]) -> Result<()> {
    let providers = if names.is_empty() {
        Provider::ALL.to_vec()
    } else {
        names
            .iter()
            .map(|name| name.parse::<Provider>())
            .collect::<Result<Vec<_>, _>>()?
    };

    let config = ResolvedConfig::from_env();
    let green = Style::new().green();
    let red = Style::new().red();

    for provider in &providers {
        match config.api_key(*provider) {
            Ok(_) => println!(
                "  {} {} ({})",
                green.apply_to("✓"),
                provider.display_name(),
                provider.api_key_var()
            ),
            Err(_) => println!(
                "  {} {} ({} not set)",
                red.apply_to("✗"),
                provider.display_name(),
                provider.api_key_var()
            ),
        }
    }

    config.require(&providers)?;
    println!("\nAll {} provider(s) configured.", providers.len());
    Ok(())
}
