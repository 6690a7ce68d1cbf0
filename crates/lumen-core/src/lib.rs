pub mod config;
pub mod llm;
pub mod pipeline;
pub mod search;

pub use config::{Config, ConfigError, HttpConfig, LLMConfig, PipelineSettings, SearchConfig};
pub use llm::{CompletionOptions, LLMError, OpenAIClient, LLM};
pub use pipeline::{
    ask_with_settings, AnswerResult, Mode, PipelineConfig, PipelineError, QueryPipeline, Source,
    Stage, ValidationError,
};
pub use search::{SearchError, SearchProvider, SearchResult, TavilyClient};
