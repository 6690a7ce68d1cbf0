use thiserror::Error;

/// Errors that can occur while querying the search service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Missing API key. Set TAVILY_API_KEY or pass a key explicitly.")]
    MissingApiKey,

    #[error("Search API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse search response: {0}")]
    ParseError(String),

    #[error("Search rate limited. Try again later.")]
    RateLimited,

    #[error("Search request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown search provider: {0}")]
    UnknownProvider(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Network(err.to_string())
        }
    }
}
