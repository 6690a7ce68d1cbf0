use std::time::Duration;

use super::{LLMError, OpenAIClient, LLM};
use crate::config::LLMConfig;

/// LLM Provider configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Groq's OpenAI-compatible endpoint (default)
    Groq { base_url: String, api_key: String },
    /// OpenAI or any OpenAI-compatible endpoint
    OpenAI { base_url: String, api_key: String },
    /// Local Ollama instance
    Ollama { base_url: String },
}

impl Provider {
    /// Creates a provider from LLMConfig, using `api_key` as the credential.
    ///
    /// The key is passed explicitly so callers can supply per-request
    /// credentials instead of the configured one.
    pub fn from_config(config: &LLMConfig, api_key: impl Into<String>) -> Result<Self, LLMError> {
        let api_key = api_key.into();
        let base_url = config.base_url_or_default();
        match config.provider.as_str() {
            "groq" => Ok(Provider::Groq { base_url, api_key }),
            "openai" | "openai-compatible" => Ok(Provider::OpenAI { base_url, api_key }),
            "ollama" => Ok(Provider::Ollama { base_url }),
            other => Err(LLMError::UnknownProvider(other.to_string())),
        }
    }

    /// Creates an LLM client from the provider configuration.
    pub fn build(self, timeout: Duration) -> Result<Box<dyn LLM>, LLMError> {
        let client = match self {
            Provider::Groq { base_url, api_key } => {
                if api_key.is_empty() {
                    return Err(LLMError::MissingApiKey);
                }
                OpenAIClient::new(base_url, api_key)
            }
            Provider::OpenAI { base_url, api_key } => OpenAIClient::new(base_url, api_key),
            Provider::Ollama { base_url } => OpenAIClient::new(base_url, ""),
        };

        Ok(Box::new(client.with_timeout(timeout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_GROQ_URL, DEFAULT_OLLAMA_URL};

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_groq_requires_key() {
        let provider = Provider::Groq {
            base_url: DEFAULT_GROQ_URL.to_string(),
            api_key: String::new(),
        };
        assert!(matches!(provider.build(TIMEOUT), Err(LLMError::MissingApiKey)));
    }

    #[test]
    fn test_ollama_provider_build() {
        let provider = Provider::Ollama {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
        };
        // Should succeed without API key
        assert!(provider.build(TIMEOUT).is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = LLMConfig {
            provider: "ollama".to_string(),
            ..LLMConfig::default()
        };
        let provider = Provider::from_config(&config, "").unwrap();
        assert!(matches!(provider, Provider::Ollama { base_url } if base_url == DEFAULT_OLLAMA_URL));
    }

    #[test]
    fn test_from_config_keeps_custom_url() {
        let config = LLMConfig {
            base_url: Some("http://localhost:8080/v1".to_string()),
            ..LLMConfig::default()
        };
        let provider = Provider::from_config(&config, "gsk").unwrap();
        assert!(matches!(
            provider,
            Provider::Groq { base_url, api_key } if base_url == "http://localhost:8080/v1" && api_key == "gsk"
        ));
    }

    #[test]
    fn test_unknown_provider() {
        let config = LLMConfig {
            provider: "carrier-pigeon".to_string(),
            ..LLMConfig::default()
        };
        let result = Provider::from_config(&config, "key");
        assert!(matches!(result, Err(LLMError::UnknownProvider(p)) if p == "carrier-pigeon"));
    }
}
