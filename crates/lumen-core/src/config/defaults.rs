//! Default values for Lumen configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Search Defaults
// ============================================================================

/// Default search backend.
pub const DEFAULT_SEARCH_PROVIDER: &str = "tavily";

/// Default Tavily API URL.
pub const DEFAULT_TAVILY_URL: &str = "https://api.tavily.com";

/// Maximum number of search results requested per question.
pub const DEFAULT_MAX_RESULTS: usize = 5;

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default LLM provider.
pub const DEFAULT_LLM_PROVIDER: &str = "groq";

// Groq defaults
/// Default Groq API URL (OpenAI-compatible).
pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1";

// OpenAI defaults
/// Default OpenAI API URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

// Ollama defaults
/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1";

/// Models offered in the model picker. The first one is the default.
///
/// Any other identifier is forwarded to the provider verbatim.
pub const AVAILABLE_MODELS: &[&str] = &[
    "mixtral-8x7b-32768",
    "llama3-70b-8192",
    "llama3-8b-8192",
    "gemma2-9b-it",
    "llama-3.1-8b-instant",
];

/// Default model.
pub const DEFAULT_MODEL: &str = AVAILABLE_MODELS[0];

/// Token cap for the answer completion.
pub const DEFAULT_ANSWER_MAX_TOKENS: u32 = 500;

/// Token cap for the follow-up questions completion.
pub const DEFAULT_FOLLOW_UP_MAX_TOKENS: u32 = 150;

// ============================================================================
// Pipeline Defaults
// ============================================================================

/// URLs that never appear in the source list.
pub const DEFAULT_EXCLUDED_URLS: &[&str] = &[
    "https://www2.deloitte.com/us/en/insights/economy/asia-pacific/india-economic-outlook.html",
    "https://www.ibef.org/economy/indian-economy-overview",
];

/// Number of sources shown to the user.
pub const DEFAULT_SOURCE_DISPLAY_LIMIT: usize = 3;

/// Number of follow-up questions produced.
pub const FOLLOW_UP_COUNT: usize = 3;

// ============================================================================
// HTTP Defaults
// ============================================================================

/// Per-request timeout for both external services.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Prompts
// ============================================================================

/// System instruction sent with every completion.
pub const SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
