// %% [markdown]
// # Example 03: Resolved configuration
//
// Shows:
// - Resolving every provider once at startup
// - Failing early with `require`
// - Redacted secrets in logs
// - Testing with an in-memory configuration source
//
// ```text
// cargo run -p eadlangchain --example resolved_config
// ```

// %%
use eadlangchain_config::{MapConfigProvider, Provider, ResolvedConfig, load_env_config};
use eadlangchain_logging::setup_logging;

// %% [markdown]
// ## Resolve once
//
// `ResolvedConfig` snapshots keys and models so the rest of the program
// never reads the environment again.

// %%
fn resolve_from_environment() -> anyhow::Result<ResolvedConfig> {
    load_env_config()?;
    let config = ResolvedConfig::from_env();
    for settings in config.iter() {
        tracing::info!(
            provider = %settings.provider,
            model = %settings.model,
            key = ?settings.api_key,
            "resolved provider"
        );
    }
    Ok(config)
}

// %% [markdown]
// ## Fail early
//
// `require` reports the first missing key before any work starts.

// %%
fn require_providers(config: &ResolvedConfig) {
    match config.require(&[Provider::OpenAi, Provider::Anthropic]) {
        Ok(()) => println!("OpenAI and Anthropic are ready"),
        Err(e) => println!("{e}"),
    }
    println!("Configured: {:?}", config.configured_providers());
}

// %% [markdown]
// ## In-memory sources
//
// Any `ConfigProvider` can be resolved, which keeps tests away from the
// process environment.

// %%
fn resolve_from_map() -> anyhow::Result<()> {
    let source = MapConfigProvider::new()
        .with("EADLANGCHAIN_AI_GEMINI_API_KEY", "gm-example-key-000")
        .with("EADLANGCHAIN_AI_GEMINI_MODEL", "gemini-2.0-flash");
    let config = ResolvedConfig::resolve(&source);
    let key = config.api_key(Provider::Gemini)?;
    println!("Gemini key {} with model {}", key.masked(), config.model(Provider::Gemini));
    Ok(())
}

// %%
fn main() -> anyhow::Result<()> {
    setup_logging(None, None)?;
    let config = resolve_from_environment()?;
    require_providers(&config);
    resolve_from_map()
}
