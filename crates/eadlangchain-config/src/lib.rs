//! Configuration for EADLangChain projects.
//!
//! Every value lives in an `EADLANGCHAIN_`-prefixed environment variable,
//! optionally supplied by a `.env` file at the project root:
//!
//! - `EADLANGCHAIN_AI_<PROVIDER>_API_KEY` (required per provider you use)
//! - `EADLANGCHAIN_AI_<PROVIDER>_MODEL` (optional, falls back to a default)
//! - `EADLANGCHAIN_LOG_LEVEL`, `EADLANGCHAIN_LOG_FILE`
//!
//! ```no_run
//! use eadlangchain_config::{Provider, get_api_key, get_model_name_or_default, load_env_config};
//!
//! load_env_config()?;
//! let key = get_api_key(Provider::OpenAi)?;
//! let model = get_model_name_or_default(Provider::OpenAi);
//! # let _ = (key, model);
//! # Ok::<(), eadlangchain_config::ConfigError>(())
//! ```

pub mod env;
pub mod error;
pub mod provider;
pub mod resolved;
pub mod types;

use std::collections::BTreeMap;

pub use env::{
    LoadedEnv, find_env_file, load_env_config, load_env_config_from,
    load_env_config_with_options, namespaced_entries,
};
pub use error::{ConfigError, Result};
pub use provider::{ConfigProvider, EnvConfigProvider, MapConfigProvider};
pub use resolved::{ProviderSettings, ResolvedConfig};
pub use types::*;

// ─────────────────────────────────────────────────────────────────────────────
// Process-environment shortcuts
// ─────────────────────────────────────────────────────────────────────────────

/// API key for `provider` from the process environment.
///
/// Fails with [`ConfigError::MissingApiKey`] naming the variable when it is
/// unset or empty.
pub fn get_api_key(provider: Provider) -> Result<String> {
    EnvConfigProvider::new().api_key(provider)
}

/// API key for `provider`, or `None` when unset or empty.
pub fn get_optional_api_key(provider: Provider) -> Option<String> {
    EnvConfigProvider::new().optional_api_key(provider)
}

/// Every provider mapped to its key, if configured.
pub fn get_all_api_keys() -> BTreeMap<Provider, Option<String>> {
    EnvConfigProvider::new().all_api_keys()
}

/// Check that `provider` has a key configured.
pub fn validate_provider(provider: Provider) -> Result<()> {
    EnvConfigProvider::new().validate(provider)
}

/// Model override for `provider`, if configured.
pub fn get_model_name(provider: Provider) -> Option<String> {
    EnvConfigProvider::new().model_name(provider)
}

/// Model override for `provider`, or its default model.
pub fn get_model_name_or_default(provider: Provider) -> String {
    EnvConfigProvider::new().model_name_or_default(provider)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
