//! Provider identifiers, variable names, and the redacted secret wrapper.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Namespace prefix shared by every variable this crate reads.
pub const ENV_PREFIX: &str = "EADLANGCHAIN_";

/// Log threshold variable (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`).
pub const LOG_LEVEL_VAR: &str = "EADLANGCHAIN_LOG_LEVEL";

/// Optional log file path variable.
pub const LOG_FILE_VAR: &str = "EADLANGCHAIN_LOG_FILE";

// ─────────────────────────────────────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Anthropic,
    Gemini,
}

impl Provider {
    /// Every provider, in declaration order.
    pub const ALL: [Provider; 3] = [Provider::OpenAi, Provider::Anthropic, Provider::Gemini];

    /// Lowercase identifier used on the command line and in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Gemini => "Google Gemini",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "EADLANGCHAIN_AI_OPENAI_API_KEY",
            Provider::Anthropic => "EADLANGCHAIN_AI_ANTHROPIC_API_KEY",
            Provider::Gemini => "EADLANGCHAIN_AI_GEMINI_API_KEY",
        }
    }

    /// Environment variable holding this provider's model override.
    pub fn model_var(&self) -> &'static str {
        match self {
            Provider::OpenAi => "EADLANGCHAIN_AI_OPENAI_MODEL",
            Provider::Anthropic => "EADLANGCHAIN_AI_ANTHROPIC_MODEL",
            Provider::Gemini => "EADLANGCHAIN_AI_GEMINI_MODEL",
        }
    }

    /// Cheapest general-purpose model, used when no override is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-5-nano",
            Provider::Anthropic => "claude-3-haiku-20240307",
            Provider::Gemini => "gemini-2.0-flash-lite",
        }
    }

    /// Comma-separated, sorted list of supported identifiers.
    pub fn supported_names() -> String {
        let mut names: Vec<&str> = Provider::ALL.iter().map(Provider::as_str).collect();
        names.sort_unstable();
        names.join(", ")
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownProvider {
                name,
                supported: Provider::supported_names(),
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ApiKey
// ─────────────────────────────────────────────────────────────────────────────

/// An API key whose formatting never reveals the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw secret, for handing to a provider client.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short masked form for status output, e.g. `sk-t…23`.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}…{}", head, tail)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
