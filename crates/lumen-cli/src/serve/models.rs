//! API request and response models for the web server.

use serde::{Deserialize, Serialize};

use lumen_core::{Mode, Source};

// =============================================================================
// Ask (`POST /api/ask`)
// =============================================================================

/// Body of an ask request. Omitted fields fall back to the server's config.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub search_api_key: Option<String>,
    #[serde(default)]
    pub llm_api_key: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub follow_ups: Option<bool>,
}

/// Answer shown to the user.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    /// First few non-excluded sources.
    pub sources: Vec<Source>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_ups: Option<Vec<String>>,
}

/// Body returned with 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// Options (`GET /api/options`)
// =============================================================================

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub models: Vec<String>,
    pub default_model: String,
    pub modes: Vec<ModeOption>,
    pub default_mode: Mode,
    pub follow_ups: bool,
}

#[derive(Debug, Serialize)]
pub struct ModeOption {
    pub value: Mode,
    pub label: &'static str,
}
