//! Configuration error types.

use std::path::PathBuf;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and lookup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required API key is unset or empty.
    #[error(
        "API key not found for provider '{provider}'. Please set {env_var} in your .env file or environment variables. See .env.example for template."
    )]
    MissingApiKey { provider: String, env_var: String },

    /// Provider name outside the supported set.
    #[error("unknown provider: {name}. Supported providers: {supported}")]
    UnknownProvider { name: String, supported: String },

    /// Failed to read or parse a `.env` file.
    #[error("failed to load env file '{}': {source}", path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
}

impl ConfigError {
    /// Name of the environment variable this error is about, if any.
    pub fn env_var(&self) -> Option<&str> {
        match self {
            ConfigError::MissingApiKey { env_var, .. } => Some(env_var),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_variable() {
        let err = ConfigError::MissingApiKey {
            provider: "openai".to_string(),
            env_var: "EADLANGCHAIN_AI_OPENAI_API_KEY".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'openai'"));
        assert!(msg.contains("EADLANGCHAIN_AI_OPENAI_API_KEY"));
        assert!(msg.contains(".env.example"));
        assert_eq!(err.env_var(), Some("EADLANGCHAIN_AI_OPENAI_API_KEY"));
    }

    #[test]
    fn test_unknown_provider_message() {
        let err = ConfigError::UnknownProvider {
            name: "groq".to_string(),
            supported: "anthropic, gemini, openai".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unknown provider: groq. Supported providers: anthropic, gemini, openai"
        );
        assert!(err.env_var().is_none());
    }
}
