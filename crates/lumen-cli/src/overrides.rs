//! Per-request settings supplied by a UI on top of the loaded config.

use lumen_core::{Mode, PipelineConfig};

/// Values a user picked for one question. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct QueryOverrides {
    pub model: Option<String>,
    pub mode: Option<Mode>,
    pub search_api_key: Option<String>,
    pub llm_api_key: Option<String>,
}

impl QueryOverrides {
    /// Applies the overrides. Blank strings count as not supplied.
    pub fn apply(self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(model) = non_blank(self.model) {
            config.model = model;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(key) = non_blank(self.search_api_key) {
            config.search_api_key = key;
        }
        if let Some(key) = non_blank(self.llm_api_key) {
            config.generation_api_key = key;
        }
        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
