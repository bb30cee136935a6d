//! Resolved configuration snapshot.
//!
//! Takes any [`ConfigProvider`] and resolves every provider's key and model
//! once, so callers can fail at startup with [`ResolvedConfig::require`]
//! instead of discovering a missing key mid-run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::{
    ApiKey, ConfigError, ConfigProvider, EnvConfigProvider, LOG_FILE_VAR, LOG_LEVEL_VAR, Provider,
    Result,
};

/// Key and model for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub provider: Provider,
    /// Present only when configured.
    pub api_key: Option<ApiKey>,
    /// Effective model name.
    pub model: String,
    /// Whether `model` came from configuration rather than the default.
    pub model_configured: bool,
}

/// Immutable view of the configuration at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    providers: BTreeMap<Provider, ProviderSettings>,
    /// Value of `EADLANGCHAIN_LOG_LEVEL`, if set.
    pub log_level: Option<String>,
    /// Value of `EADLANGCHAIN_LOG_FILE`, if set.
    pub log_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Resolve every provider from `source`.
    pub fn resolve(source: &impl ConfigProvider) -> Self {
        let providers = Provider::ALL
            .into_iter()
            .map(|provider| {
                let configured = source.model_name(provider);
                let settings = ProviderSettings {
                    provider,
                    api_key: source.optional_api_key(provider).map(ApiKey::new),
                    model_configured: configured.is_some(),
                    model: configured.unwrap_or_else(|| provider.default_model().to_string()),
                };
                (provider, settings)
            })
            .collect();

        Self {
            providers,
            log_level: source.lookup_non_empty(LOG_LEVEL_VAR),
            log_file: source.lookup_non_empty(LOG_FILE_VAR).map(PathBuf::from),
        }
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(&EnvConfigProvider::new())
    }

    /// Settings for `provider`.
    pub fn settings(&self, provider: Provider) -> &ProviderSettings {
        // Every provider is inserted by `resolve`.
        &self.providers[&provider]
    }

    /// API key for `provider`, or the same error `get_api_key` would return.
    pub fn api_key(&self, provider: Provider) -> Result<&ApiKey> {
        self.settings(provider)
            .api_key
            .as_ref()
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: provider.as_str().to_string(),
                env_var: provider.api_key_var().to_string(),
            })
    }

    /// Effective model name for `provider`.
    pub fn model(&self, provider: Provider) -> &str {
        &self.settings(provider).model
    }

    /// Fail on the first provider in `required` without a key.
    pub fn require(&self, required: &[Provider]) -> Result<()> {
        for provider in required {
            self.api_key(*provider)?;
        }
        Ok(())
    }

    /// Providers that have a key, in declaration order.
    pub fn configured_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.settings(*p).api_key.is_some())
            .collect()
    }

    /// Iterate over every provider's settings.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderSettings> {
        self.providers.values()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
