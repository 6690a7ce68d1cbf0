//! Fail-soft conversion of pipeline errors into renderable output.
//!
//! The pipeline itself returns typed errors. UI adapters pass those results
//! through these functions so the user always gets something to display.

use tracing::warn;

use super::follow_ups::fallback_follow_ups;
use super::{AnswerResult, PipelineError};

/// Converts a failed answer into `"Error: <message>"` with no sources.
pub fn answer_or_error(outcome: Result<AnswerResult, PipelineError>) -> AnswerResult {
    match outcome {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "answer failed, returning error text");
            AnswerResult::from_error(err)
        }
    }
}

/// Converts a failed follow-up request into the fixed fallback triple.
pub fn follow_ups_or_fallback(
    question: &str,
    outcome: Result<Vec<String>, PipelineError>,
) -> Vec<String> {
    match outcome {
        Ok(questions) => questions,
        Err(err) => {
            warn!(error = %err, "follow-up generation failed, using fallback questions");
            fallback_follow_ups(question)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMError;
    use crate::pipeline::Source;
    use crate::search::SearchError;

    #[test]
    fn test_answer_passthrough() {
        let ok = AnswerResult::new("fine", vec![Source::new("t", "u")]);
        assert_eq!(answer_or_error(Ok(ok.clone())), ok);
    }

    #[test]
    fn test_search_error_message() {
        let result = answer_or_error(Err(SearchError::Timeout.into()));
        assert_eq!(result.answer_text, "Error: Search request timed out");
        assert!(result.sources.is_empty());
    }

    #[test]
    fn test_follow_ups_fallback() {
        let result = follow_ups_or_fallback("x", Err(LLMError::RateLimited.into()));
        assert_eq!(result, fallback_follow_ups("x"));
    }
}
