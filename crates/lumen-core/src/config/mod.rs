//! Configuration management for Lumen.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `lumen.toml` file
//! 3. User config `~/.config/lumen/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::pipeline::{Mode, PipelineConfig};

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search service configuration.
    pub search: SearchConfig,

    /// LLM provider configuration.
    pub llm: LLMConfig,

    /// Query pipeline configuration.
    pub pipeline: PipelineSettings,

    /// HTTP client configuration.
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./lumen.toml` (project local)
    /// 2. `~/.config/lumen/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("lumen.toml").exists() {
            return Self::from_file("lumen.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("lumen").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides using `lookup` to resolve variable names.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Search overrides
        if let Some(key) = lookup("LUMEN_SEARCH_API_KEY").or_else(|| lookup("TAVILY_API_KEY")) {
            self.search.api_key = Some(key);
        }
        if let Some(url) = lookup("LUMEN_SEARCH_BASE_URL") {
            self.search.base_url = Some(url);
        }

        // LLM overrides
        if let Some(key) = lookup("LUMEN_LLM_API_KEY").or_else(|| lookup("GROQ_API_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(provider) = lookup("LUMEN_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Some(model) = lookup("LUMEN_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = lookup("LUMEN_LLM_BASE_URL") {
            self.llm.base_url = Some(url);
        }

        // Pipeline overrides
        if let Some(mode) = lookup("LUMEN_MODE") {
            if let Ok(mode) = mode.parse() {
                self.pipeline.mode = mode;
            }
        }

        // HTTP overrides
        if let Some(secs) = lookup("LUMEN_HTTP_TIMEOUT_SECS") {
            if let Ok(n) = secs.parse() {
                self.http.timeout_secs = n;
            }
        }
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be at least 1".to_string(),
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        Ok(())
    }

    /// Build the per-request pipeline configuration from these settings.
    ///
    /// Missing API keys become empty strings; callers validate them with
    /// [`PipelineConfig::validate`] before running a query.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            search_api_key: self.search.api_key.clone().unwrap_or_default(),
            generation_api_key: self.llm.api_key.clone().unwrap_or_default(),
            model: self.llm.model.clone(),
            mode: self.pipeline.mode,
            excluded_urls: self.pipeline.excluded_urls.iter().cloned().collect(),
            max_results: self.search.max_results,
            answer_max_tokens: self.llm.answer_max_tokens,
            follow_up_max_tokens: self.llm.follow_up_max_tokens,
            max_context_chars: self.pipeline.max_context_chars,
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Search service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Backend name. Only "tavily" is supported.
    pub provider: String,

    /// Base URL override for the search API.
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum number of results requested per question.
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_SEARCH_PROVIDER.to_string(),
            base_url: None,
            api_key: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

impl SearchConfig {
    /// Get the base URL, falling back to the backend default.
    pub fn base_url_or_default(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_TAVILY_URL.to_string())
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider name: "groq", "openai", "ollama" or "openai-compatible".
    pub provider: String,

    /// Model identifier forwarded to the provider.
    pub model: String,

    /// Base URL for API (for openai-compatible providers).
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Token cap for answers.
    pub answer_max_tokens: u32,

    /// Token cap for follow-up questions.
    pub follow_up_max_tokens: u32,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_LLM_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key: None,
            answer_max_tokens: DEFAULT_ANSWER_MAX_TOKENS,
            follow_up_max_tokens: DEFAULT_FOLLOW_UP_MAX_TOKENS,
        }
    }
}

impl LLMConfig {
    /// Get the base URL, falling back to provider defaults.
    pub fn base_url_or_default(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "openai" | "openai-compatible" => DEFAULT_OPENAI_URL.to_string(),
                "ollama" => DEFAULT_OLLAMA_URL.to_string(),
                _ => DEFAULT_GROQ_URL.to_string(),
            }
        })
    }
}

/// Query pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Prompting mode.
    pub mode: Mode,

    /// Whether follow-up questions are generated after the answer.
    pub follow_ups: bool,

    /// URLs removed from the source list.
    pub excluded_urls: Vec<String>,

    /// Optional cap on the search context, in characters.
    pub max_context_chars: Option<usize>,

    /// Number of sources shown to the user.
    pub source_display_limit: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            follow_ups: true,
            excluded_urls: DEFAULT_EXCLUDED_URLS.iter().map(|s| s.to_string()).collect(),
            max_context_chars: None,
            source_display_limit: DEFAULT_SOURCE_DISPLAY_LIMIT,
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(config.llm.provider, DEFAULT_LLM_PROVIDER);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.pipeline.excluded_urls.len(), 2);
        assert!(config.pipeline.follow_ups);
    }

    #[test]
    fn test_api_keys_not_serialized() {
        let mut config = Config::default();
        config.search.api_key = Some("tvly-secret".to_string());
        config.llm.api_key = Some("gsk-secret".to_string());

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(!toml_str.contains("secret"));
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("TAVILY_API_KEY", "tvly-1"),
            ("LUMEN_LLM_API_KEY", "gsk-1"),
            ("GROQ_API_KEY", "gsk-ignored"),
            ("LUMEN_MODE", "think-hard"),
            ("LUMEN_HTTP_TIMEOUT_SECS", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides_from(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.search.api_key.as_deref(), Some("tvly-1"));
        assert_eq!(config.llm.api_key.as_deref(), Some("gsk-1"));
        assert_eq!(config.pipeline.mode, Mode::ThinkHard);
        assert_eq!(config.http.timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
    }

    #[test]
    fn test_base_url_or_default() {
        let mut config = LLMConfig::default();
        assert_eq!(config.base_url_or_default(), DEFAULT_GROQ_URL);

        config.provider = "ollama".to_string();
        assert_eq!(config.base_url_or_default(), DEFAULT_OLLAMA_URL);

        config.provider = "openai-compatible".to_string();
        assert_eq!(config.base_url_or_default(), DEFAULT_OPENAI_URL);

        config.base_url = Some("http://localhost:8080/v1".to_string());
        assert_eq!(config.base_url_or_default(), "http://localhost:8080/v1");
    }

    #[test]
    fn test_validate_rejects_zero_results() {
        let mut config = Config::default();
        config.search.max_results = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
