use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionOptions, LLMError, LLM};
use crate::config::{
    DEFAULT_GROQ_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_URL,
};

/// OpenAI-compatible API client.
///
/// Works with any provider that implements the OpenAI chat completions API:
/// - Groq (default)
/// - OpenAI
/// - Ollama (http://localhost:11434/v1)
/// - vLLM, llama.cpp, OpenRouter and friends
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl OpenAIClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., "https://api.groq.com/openai/v1")
    /// * `api_key` - The API key (can be empty for local providers like Ollama)
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            client: Client::new(),
        }
    }

    /// Creates a client for Groq.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_GROQ_URL, api_key)
    }

    /// Creates a client for OpenAI.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(DEFAULT_OPENAI_URL, api_key)
    }

    /// Creates a client for Ollama (local).
    pub fn ollama() -> Self {
        Self::new(DEFAULT_OLLAMA_URL, "")
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_request(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String, LLMError> {
        let request = ChatRequest {
            model: options.model.clone(),
            messages,
            max_tokens: Some(options.max_tokens),
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(%url, model = %options.model, max_tokens = options.max_tokens, "sending chat completion");

        let mut req = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("content-type", "application/json");

        // Only add authorization if api_key is not empty
        if !self.api_key.is_empty() {
            req = req.header("authorization", format!("Bearer {}", self.api_key));
        }

        let response = req.json(&request).send().await?;

        let status = response.status();

        if status == 429 {
            return Err(LLMError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        parse_chat_response(&body)
    }
}

#[async_trait]
impl LLM for OpenAIClient {
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LLMError> {
        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: Some(system.to_string()),
            },
            ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            },
        ];

        self.send_request(messages, options).await
    }
}

/// Extracts the first choice's content from a chat completion body.
fn parse_chat_response(body: &str) -> Result<String, LLMError> {
    let chat_response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LLMError::ParseError(e.to_string()))?;

    chat_response
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content.unwrap_or_default())
        .ok_or(LLMError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}
