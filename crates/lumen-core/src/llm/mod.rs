mod error;
mod openai;
mod provider;

pub use error::LLMError;
pub use openai::OpenAIClient;
pub use provider::Provider;

use async_trait::async_trait;

/// Per-call generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Model identifier, forwarded verbatim.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionOptions {
    pub fn new(model: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_tokens,
        }
    }
}

/// Trait for Large Language Model providers.
///
/// The model and token budget travel with each call, so one client can
/// serve every model the provider hosts.
///
/// # Example
///
/// ```ignore
/// use lumen_core::llm::{CompletionOptions, OpenAIClient, LLM};
///
/// let llm = OpenAIClient::groq("gsk-...");
/// let options = CompletionOptions::new("mixtral-8x7b-32768", 500);
/// let response = llm
///     .complete_with_system("You are a helpful AI assistant.", "Hello!", &options)
///     .await?;
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Complete a prompt with a system message and return the first
    /// completion's text.
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LLMError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LLMError> {
        (**self).complete_with_system(system, prompt, options).await
    }
}
