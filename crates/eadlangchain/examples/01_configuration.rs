// %% [markdown]
// # Example 01: Configuration
//
// Shows:
// - Loading `.env` from the project root
// - Reading API keys and model names per provider
// - Handling a missing key
//
// Copy `.env.example` to `.env` and fill in at least one key before running:
//
// ```text
// cargo run -p eadlangchain --example configuration
// ```

// %%
use eadlangchain_config::{
    ConfigError, Provider, get_all_api_keys, get_api_key, get_model_name_or_default,
    load_env_config,
};

// %% [markdown]
// ## Loading the environment
//
// `load_env_config` searches upward from the working directory for a `.env`
// file. Variables already set in the process win over the file, and calling
// it twice is harmless.

// %%
fn load_environment() -> anyhow::Result<()> {
    let loaded = load_env_config()?;
    match &loaded.source {
        Some(path) => println!("Loaded {} ({} entries)", path.display(), loaded.entries.len()),
        None => println!("No .env file found, using the process environment"),
    }
    Ok(())
}

// %% [markdown]
// ## Keys and models
//
// Keys live in `EADLANGCHAIN_AI_<PROVIDER>_API_KEY`. Models are optional and
// fall back to a cheap default per provider.

// %%
fn show_providers() {
    for (provider, key) in get_all_api_keys() {
        let status = if key.is_some() { "configured" } else { "missing" };
        println!(
            "{:<20} key {:<10} model {}",
            provider.display_name(),
            status,
            get_model_name_or_default(provider)
        );
    }
}

// %% [markdown]
// ## Missing keys
//
// A missing key is an error that names the variable to set.

// %%
fn read_openai_key() {
    match get_api_key(Provider::OpenAi) {
        Ok(key) => println!("OpenAI key has {} characters", key.len()),
        Err(ConfigError::MissingApiKey { env_var, .. }) => {
            println!("Set {env_var} to use OpenAI")
        }
        Err(e) => println!("Unexpected error: {e}"),
    }
}

// %%
fn main() -> anyhow::Result<()> {
    load_environment()?;
    show_providers();
    read_openai_key();
    Ok(())
}
