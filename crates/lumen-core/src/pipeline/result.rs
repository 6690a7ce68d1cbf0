use serde::{Deserialize, Serialize};

use crate::search::SearchResult;

/// Prefix carried by answers that report a failure instead of model output.
pub const ERROR_PREFIX: &str = "Error: ";

/// A search hit reduced to what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

impl Source {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// Renders as `title: url`.
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.title, self.url)
    }
}

impl From<&SearchResult> for Source {
    fn from(result: &SearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
        }
    }
}

/// Outcome of one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Model output, or `"Error: ..."` when the query failed.
    pub answer_text: String,
    /// Every non-excluded source in search order.
    pub sources: Vec<Source>,
    /// Exactly three questions when follow-ups were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_questions: Option<Vec<String>>,
}

impl AnswerResult {
    pub fn new(answer_text: impl Into<String>, sources: Vec<Source>) -> Self {
        Self {
            answer_text: answer_text.into(),
            sources,
            follow_up_questions: None,
        }
    }

    /// The failure shape: the error's message behind [`ERROR_PREFIX`] and
    /// no sources.
    pub fn from_error(message: impl std::fmt::Display) -> Self {
        Self::new(format!("{ERROR_PREFIX}{message}"), Vec::new())
    }

    /// Whether this answer reports a failure.
    pub fn is_error(&self) -> bool {
        self.answer_text.starts_with(ERROR_PREFIX)
    }

    /// The first `limit` sources, the slice shown to users.
    pub fn display_sources(&self, limit: usize) -> &[Source] {
        &self.sources[..self.sources.len().min(limit)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_line() {
        let source = Source::new("France", "https://a");
        assert_eq!(source.display_line(), "France: https://a");
    }

    #[test]
    fn test_display_sources_limits() {
        let sources = (0..5)
            .map(|i| Source::new(format!("t{i}"), format!("https://{i}")))
            .collect();
        let result = AnswerResult::new("ok", sources);
        assert_eq!(result.display_sources(3).len(), 3);
        assert_eq!(result.display_sources(3)[2].title, "t2");
        assert_eq!(result.display_sources(10).len(), 5);
    }

    #[test]
    fn test_from_error() {
        let result = AnswerResult::from_error("boom");
        assert_eq!(result.answer_text, "Error: boom");
        assert!(result.sources.is_empty());
        assert!(result.is_error());
    }
}
