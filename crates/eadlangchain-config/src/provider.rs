//! Configuration sources.
//!
//! [`ConfigProvider`] is the seam between "where values live" and "what the
//! values mean". Implementors only supply [`ConfigProvider::lookup`]; key and
//! model resolution are provided on top of it, so every source applies the
//! same rules (empty means missing, errors name the variable).

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::{ConfigError, Provider, Result};

/// A source of namespaced configuration values.
pub trait ConfigProvider {
    /// Raw lookup of a variable by its full name.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Look up a variable, treating empty values as unset.
    fn lookup_non_empty(&self, name: &str) -> Option<String> {
        self.lookup(name).filter(|v| !v.is_empty())
    }

    /// API key for `provider`, or `ConfigError::MissingApiKey` naming the variable.
    fn api_key(&self, provider: Provider) -> Result<String> {
        self.optional_api_key(provider)
            .ok_or_else(|| ConfigError::MissingApiKey {
                provider: provider.as_str().to_string(),
                env_var: provider.api_key_var().to_string(),
            })
    }

    /// API key for `provider`, or `None` when unset or empty.
    fn optional_api_key(&self, provider: Provider) -> Option<String> {
        self.lookup_non_empty(provider.api_key_var())
    }

    /// Every provider mapped to its key, if configured.
    fn all_api_keys(&self) -> BTreeMap<Provider, Option<String>> {
        Provider::ALL
            .into_iter()
            .map(|p| (p, self.optional_api_key(p)))
            .collect()
    }

    /// Check that `provider` has a key configured.
    fn validate(&self, provider: Provider) -> Result<()> {
        self.api_key(provider).map(|_| ())
    }

    /// Model override for `provider`, if configured.
    fn model_name(&self, provider: Provider) -> Option<String> {
        self.lookup_non_empty(provider.model_var())
    }

    /// Model override for `provider`, falling back to its default model.
    fn model_name_or_default(&self, provider: Provider) -> String {
        self.model_name(provider)
            .unwrap_or_else(|| provider.default_model().to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Process environment
// ─────────────────────────────────────────────────────────────────────────────

/// Reads values from the process environment.
///
/// Values may come from the shell or from a `.env` file applied earlier with
/// [`crate::load_env_config`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigProvider;

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory store
// ─────────────────────────────────────────────────────────────────────────────

/// Reads values from an in-memory map.
///
/// Useful for tests and for reading a `.env` file without touching the
/// process environment.
#[derive(Debug, Clone, Default)]
pub struct MapConfigProvider {
    values: HashMap<String, String>,
}

impl MapConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.env` file into a store. The process environment is untouched.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path).map_err(|e| ConfigError::EnvFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| ConfigError::EnvFile {
                path: path.to_path_buf(),
                source: e,
            })?;
            values.insert(key, value);
        }
        Ok(Self { values })
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigProvider for MapConfigProvider {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfigProvider {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_api_key_present_for_every_provider() {
        for provider in Provider::ALL {
            let secret = format!("secret-for-{}", provider);
            let store = MapConfigProvider::new().with(provider.api_key_var(), secret.clone());
            assert_eq!(store.api_key(provider).unwrap(), secret);
        }
    }

    #[test]
    fn test_missing_key_names_variable_for_every_provider() {
        let store = MapConfigProvider::new();
        for provider in Provider::ALL {
            let err = store.api_key(provider).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::MissingApiKey { ref env_var, .. } if env_var == provider.api_key_var()
            ));
        }
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        let store = MapConfigProvider::new().with("EADLANGCHAIN_AI_GEMINI_API_KEY", "");
        assert!(store.api_key(Provider::Gemini).is_err());
        assert!(store.optional_api_key(Provider::Gemini).is_none());
        assert!(store.validate(Provider::Gemini).is_err());
    }

    #[test]
    fn test_all_api_keys_covers_every_provider() {
        let store = MapConfigProvider::new().with("EADLANGCHAIN_AI_OPENAI_API_KEY", "sk-1");
        let keys = store.all_api_keys();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[&Provider::OpenAi].as_deref(), Some("sk-1"));
        assert!(keys[&Provider::Anthropic].is_none());
        assert!(keys[&Provider::Gemini].is_none());
    }

    #[test]
    fn test_model_name_and_default() {
        let store = MapConfigProvider::new().with("EADLANGCHAIN_AI_ANTHROPIC_MODEL", "claude-haiku-4-5");
        assert_eq!(
            store.model_name(Provider::Anthropic).as_deref(),
            Some("claude-haiku-4-5")
        );
        assert_eq!(store.model_name(Provider::OpenAi), None);
        assert_eq!(store.model_name_or_default(Provider::OpenAi), "gpt-5-nano");
        assert_eq!(
            store.model_name_or_default(Provider::Anthropic),
            "claude-haiku-4-5"
        );
    }

    #[test]
    fn test_from_env_file_reads_without_touching_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "EADLANGCHAIN_AI_GEMINI_API_KEY=from-file-only").unwrap();
        writeln!(file, "EADLANGCHAIN_AI_GEMINI_MODEL=\"gemini-2.5-flash\"").unwrap();

        let store = MapConfigProvider::from_env_file(file.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.api_key(Provider::Gemini).unwrap(), "from-file-only");
        assert_eq!(
            store.model_name(Provider::Gemini).as_deref(),
            Some("gemini-2.5-flash")
        );
    }

    #[test]
    fn test_from_env_file_missing_path() {
        let err = MapConfigProvider::from_env_file(Path::new("/nonexistent/.env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile { .. }));
    }

    #[test]
    fn test_collect_into_store() {
        let store: MapConfigProvider = [("EADLANGCHAIN_AI_OPENAI_API_KEY", "sk-x")]
            .into_iter()
            .collect();
        assert!(!store.is_empty());
        assert!(store.validate(Provider::OpenAi).is_ok());
    }
}
