use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, SYSTEM_PROMPT};
use crate::llm::{CompletionOptions, LLMError, Provider, LLM};
use crate::search::{SearchBackend, SearchError, SearchProvider, SearchResult};

use super::fallback::{answer_or_error, follow_ups_or_fallback};
use super::follow_ups::{fallback_follow_ups, parse_follow_ups};
use super::prompts::{build_answer_prompt, build_follow_up_prompt};
use super::{AnswerResult, PipelineConfig, Source};

/// Errors that can occur while answering a question.
///
/// Both variants display as the underlying error's message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Generation(#[from] LLMError),
}

/// Steps of [`QueryPipeline::ask_observed`], reported as they start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Answering,
    FollowUps,
    Finished,
}

/// Answers questions from web search results.
pub struct QueryPipeline<S: SearchProvider, L: LLM> {
    search: S,
    llm: L,
    config: PipelineConfig,
}

impl QueryPipeline<Box<dyn SearchProvider>, Box<dyn LLM>> {
    /// Builds the search and generation clients described by `settings`,
    /// authenticated with the keys in `config`.
    pub fn from_settings(settings: &Config, config: PipelineConfig) -> Result<Self, PipelineError> {
        let timeout = settings.http.timeout();

        let search = SearchBackend::from_config(&settings.search, config.search_api_key.clone())?
            .build(timeout)?;
        let llm = Provider::from_config(&settings.llm, config.generation_api_key.clone())?
            .build(timeout)?;

        Ok(Self::new(search, llm, config))
    }
}

impl<S: SearchProvider, L: LLM> QueryPipeline<S, L> {
    /// Creates a pipeline over explicit clients.
    pub fn new(search: S, llm: L, config: PipelineConfig) -> Self {
        Self { search, llm, config }
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Searches the web for `question` and asks the model to answer from
    /// the results.
    pub async fn answer(&self, question: &str) -> Result<AnswerResult, PipelineError> {
        info!(mode = %self.config.mode, model = %self.config.model, "answering question");

        // 1. Search
        let results = self.search.search(question, self.config.max_results).await?;
        debug!(count = results.len(), "search complete");

        // 2. Context and sources
        let context = build_context(&results, self.config.max_context_chars);
        let sources = collect_sources(&results, &self.config);

        // 3. Generate
        let prompt = build_answer_prompt(self.config.mode, question, &context);
        let options = CompletionOptions::new(&self.config.model, self.config.answer_max_tokens);
        let answer_text = self
            .llm
            .complete_with_system(SYSTEM_PROMPT, &prompt, &options)
            .await?;

        info!(sources = sources.len(), "answer generated");
        Ok(AnswerResult::new(answer_text, sources))
    }

    /// Asks the model for three follow-up questions about `question` and
    /// its `answer`.
    pub async fn follow_ups(&self, question: &str, answer: &str) -> Result<Vec<String>, PipelineError> {
        let prompt = build_follow_up_prompt(self.config.mode, question, answer);
        let options = CompletionOptions::new(&self.config.model, self.config.follow_up_max_tokens);
        let text = self
            .llm
            .complete_with_system(SYSTEM_PROMPT, &prompt, &options)
            .await?;

        Ok(parse_follow_ups(question, &text))
    }

    /// [`answer`](Self::answer) with failures folded into the result text.
    pub async fn answer_fail_soft(&self, question: &str) -> AnswerResult {
        answer_or_error(self.answer(question).await)
    }

    /// [`follow_ups`](Self::follow_ups) with failures replaced by the
    /// fallback questions.
    pub async fn follow_ups_fail_soft(&self, question: &str, answer: &str) -> Vec<String> {
        follow_ups_or_fallback(question, self.follow_ups(question, answer).await)
    }

    /// Answers `question` and, when asked, derives follow-up questions from
    /// the answer text. Never fails.
    pub async fn ask(&self, question: &str, with_follow_ups: bool) -> AnswerResult {
        self.ask_observed(question, with_follow_ups, |_| {}).await
    }

    /// [`ask`](Self::ask), calling `observe` as each stage starts.
    pub async fn ask_observed(
        &self,
        question: &str,
        with_follow_ups: bool,
        mut observe: impl FnMut(Stage),
    ) -> AnswerResult {
        observe(Stage::Answering);
        let mut result = self.answer_fail_soft(question).await;

        if with_follow_ups {
            observe(Stage::FollowUps);
            let questions = self.follow_ups_fail_soft(question, &result.answer_text).await;
            result.follow_up_questions = Some(questions);
        }

        observe(Stage::Finished);
        result
    }
}

/// Builds the configured clients and asks `question`. Never fails.
///
/// When the clients cannot be built the error becomes the answer text and
/// the fallback questions stand in for follow-ups.
pub async fn ask_with_settings(
    settings: &Config,
    config: PipelineConfig,
    question: &str,
    with_follow_ups: bool,
    mut observe: impl FnMut(Stage),
) -> AnswerResult {
    match QueryPipeline::from_settings(settings, config) {
        Ok(pipeline) => {
            pipeline
                .ask_observed(question, with_follow_ups, observe)
                .await
        }
        Err(err) => {
            let mut result = answer_or_error(Err(err));
            if with_follow_ups {
                result.follow_up_questions = Some(fallback_follow_ups(question));
            }
            observe(Stage::Finished);
            result
        }
    }
}

/// Joins result contents with single spaces, in search order.
///
/// With `max_chars` set the context is cut to that many characters.
pub fn build_context(results: &[SearchResult], max_chars: Option<usize>) -> String {
    let context = results
        .iter()
        .map(|r| r.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    match max_chars {
        Some(max) => match context.char_indices().nth(max) {
            Some((cut, _)) => context[..cut].to_string(),
            None => context,
        },
        None => context,
    }
}

/// Projects results to sources, dropping excluded URLs.
pub fn collect_sources(results: &[SearchResult], config: &PipelineConfig) -> Vec<Source> {
    results
        .iter()
        .filter(|r| !config.is_excluded(&r.url))
        .map(Source::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<SearchResult> {
        vec![
            SearchResult::new("A", "https://a", "alpha"),
            SearchResult::new("B", "https://b", "beta"),
            SearchResult::new("C", "https://c", "gamma"),
        ]
    }

    #[test]
    fn test_build_context_joins_with_space() {
        assert_eq!(build_context(&results(), None), "alpha beta gamma");
    }

    #[test]
    fn test_build_context_empty() {
        assert_eq!(build_context(&[], None), "");
    }

    #[test]
    fn test_build_context_cap_respects_char_boundaries() {
        let results = vec![SearchResult::new("t", "u", "héllo wörld")];
        assert_eq!(build_context(&results, Some(4)), "héll");
        assert_eq!(build_context(&results, Some(100)), "héllo wörld");
    }

    #[test]
    fn test_collect_sources_filters_excluded() {
        let config = PipelineConfig::new("s", "g").with_excluded_urls(["https://b"]);
        let sources = collect_sources(&results(), &config);
        assert_eq!(
            sources,
            vec![Source::new("A", "https://a"), Source::new("C", "https://c")]
        );
    }

    #[test]
    fn test_pipeline_error_displays_inner_message() {
        let err = PipelineError::from(LLMError::RequestFailed("boom".to_string()));
        assert_eq!(err.to_string(), "API request failed: boom");
    }

    #[tokio::test]
    async fn test_ask_with_settings_folds_build_error() {
        let mut settings = Config::default();
        settings.llm.provider = "carrier-pigeon".to_string();
        let mut stages = Vec::new();

        let result = ask_with_settings(
            &settings,
            PipelineConfig::new("tvly", "gsk"),
            "Why?",
            true,
            |stage| stages.push(stage),
        )
        .await;

        assert_eq!(result.answer_text, "Error: Unknown provider: carrier-pigeon");
        assert!(result.sources.is_empty());
        assert_eq!(result.follow_up_questions, Some(fallback_follow_ups("Why?")));
        assert_eq!(stages, vec![Stage::Finished]);
    }

    #[tokio::test]
    async fn test_ask_with_settings_skips_follow_ups() {
        let settings = Config::default();
        let result =
            ask_with_settings(&settings, PipelineConfig::new("", "gsk"), "Why?", false, |_| {}).await;
        assert!(result.is_error());
        assert!(result.follow_up_questions.is_none());
    }

    #[test]
    fn test_from_settings_requires_keys() {
        let settings = Config::default();
        let result = QueryPipeline::from_settings(&settings, PipelineConfig::new("", "gsk"));
        assert!(matches!(result, Err(PipelineError::Search(SearchError::MissingApiKey))));
    }
}
