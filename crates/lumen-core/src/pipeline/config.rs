use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    DEFAULT_ANSWER_MAX_TOKENS, DEFAULT_EXCLUDED_URLS, DEFAULT_FOLLOW_UP_MAX_TOKENS,
    DEFAULT_MAX_RESULTS, DEFAULT_MODEL,
};

/// How the model is asked to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Answer directly from the context.
    #[default]
    #[serde(rename = "adapt", alias = "adapt-to-question")]
    AdaptToQuestion,
    /// Ask for careful, step-by-step reasoning first.
    #[serde(rename = "think-hard")]
    ThinkHard,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::AdaptToQuestion, Mode::ThinkHard];

    /// Identifier used in config files, flags and the HTTP API.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::AdaptToQuestion => "adapt",
            Mode::ThinkHard => "think-hard",
        }
    }

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::AdaptToQuestion => "Adapt to Question",
            Mode::ThinkHard => "Think Hard",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adapt" | "adapt-to-question" | "adapt to question" => Ok(Mode::AdaptToQuestion),
            "think-hard" | "think hard" | "think" => Ok(Mode::ThinkHard),
            other => Err(format!(
                "unknown mode '{other}' (expected 'adapt' or 'think-hard')"
            )),
        }
    }
}

/// Reasons a query must not be sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide both Tavily and Groq API keys.")]
    MissingApiKeys,

    #[error("Please enter a question.")]
    EmptyQuestion,
}

/// Everything one request needs: credentials, model choice and limits.
///
/// Passed by value into the pipeline; nothing here is process-wide.
#[derive(Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub search_api_key: String,
    pub generation_api_key: String,
    pub model: String,
    pub mode: Mode,
    pub excluded_urls: HashSet<String>,
    pub max_results: usize,
    pub answer_max_tokens: u32,
    pub follow_up_max_tokens: u32,
    /// Cap on the concatenated search context in characters; `None` keeps
    /// everything.
    pub max_context_chars: Option<usize>,
}

impl PipelineConfig {
    /// Creates a config with default model, mode, denylist and limits.
    pub fn new(search_api_key: impl Into<String>, generation_api_key: impl Into<String>) -> Self {
        Self {
            search_api_key: search_api_key.into(),
            generation_api_key: generation_api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            mode: Mode::default(),
            excluded_urls: DEFAULT_EXCLUDED_URLS.iter().map(|s| s.to_string()).collect(),
            max_results: DEFAULT_MAX_RESULTS,
            answer_max_tokens: DEFAULT_ANSWER_MAX_TOKENS,
            follow_up_max_tokens: DEFAULT_FOLLOW_UP_MAX_TOKENS,
            max_context_chars: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_excluded_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_excluded(&self, url: &str) -> bool {
        self.excluded_urls.contains(url)
    }

    /// Checks the preconditions of a query. Keys are checked before the
    /// question.
    pub fn validate(&self, question: &str) -> Result<(), ValidationError> {
        if self.search_api_key.trim().is_empty() || self.generation_api_key.trim().is_empty() {
            return Err(ValidationError::MissingApiKeys);
        }
        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        Ok(())
    }
}

// Keys stay out of logs and panic messages.
impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("search_api_key", &redact(&self.search_api_key))
            .field("generation_api_key", &redact(&self.generation_api_key))
            .field("model", &self.model)
            .field("mode", &self.mode)
            .field("excluded_urls", &self.excluded_urls)
            .field("max_results", &self.max_results)
            .field("answer_max_tokens", &self.answer_max_tokens)
            .field("follow_up_max_tokens", &self.follow_up_max_tokens)
            .field("max_context_chars", &self.max_context_chars)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
