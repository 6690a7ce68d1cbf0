//! Client behavior over real HTTP, against a local mock server.

use mockito::{Matcher, Server};
use serde_json::json;

use lumen_core::{
    CompletionOptions, LLMError, OpenAIClient, SearchError, SearchProvider, SearchResult,
    TavilyClient, LLM,
};

// =============================================================================
// Tavily
// =============================================================================

#[tokio::test]
async fn test_tavily_search_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/search")
        .match_header("authorization", "Bearer tvly-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "capital of France",
            "max_results": 5
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"results": [
                {"title": "France", "url": "https://a", "content": "Paris is the capital."},
                {"title": "Paris", "url": "https://b", "content": "City of light."}
            ]}"#,
        )
        .create_async()
        .await;

    let client = TavilyClient::new("tvly-test").with_base_url(server.url());
    let results = client.search("capital of France", 5).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        results,
        vec![
            SearchResult::new("France", "https://a", "Paris is the capital."),
            SearchResult::new("Paris", "https://b", "City of light."),
        ]
    );
}

#[tokio::test]
async fn test_tavily_rate_limited() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let client = TavilyClient::new("tvly-test").with_base_url(server.url());
    let result = client.search("q", 5).await;

    assert!(matches!(result, Err(SearchError::RateLimited)));
}

#[tokio::test]
async fn test_tavily_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = TavilyClient::new("tvly-test").with_base_url(server.url());
    let result = client.search("q", 5).await;

    assert!(matches!(
        result,
        Err(SearchError::ApiError { status: 500, message }) if message == "internal error"
    ));
}

#[tokio::test]
async fn test_tavily_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/search")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let client = TavilyClient::new("tvly-test").with_base_url(server.url());
    let result = client.search("q", 5).await;

    assert!(matches!(result, Err(SearchError::ParseError(_))));
}

// =============================================================================
// OpenAI-compatible chat completions
// =============================================================================

fn options() -> CompletionOptions {
    CompletionOptions::new("mixtral-8x7b-32768", 150)
}

#[tokio::test]
async fn test_chat_completion_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer gsk-test")
        .match_body(Matcher::Json(json!({
            "model": "mixtral-8x7b-32768",
            "max_tokens": 150,
            "messages": [
                {"role": "system", "content": "You are a helpful AI assistant."},
                {"role": "user", "content": "What is the capital of France?"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "Paris."}}]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new(server.url(), "gsk-test");
    let text = client
        .complete_with_system(
            "You are a helpful AI assistant.",
            "What is the capital of France?",
            &options(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(text, "Paris.");
}

#[tokio::test]
async fn test_chat_completion_without_key_sends_no_auth() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "ok"}}]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new(server.url(), "");
    let text = client.complete_with_system("s", "p", &options()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(text, "ok");
}

#[tokio::test]
async fn test_chat_completion_rate_limited() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .create_async()
        .await;

    let client = OpenAIClient::new(server.url(), "gsk-test");
    let result = client.complete_with_system("s", "p", &options()).await;

    assert!(matches!(result, Err(LLMError::RateLimited)));
}

#[tokio::test]
async fn test_chat_completion_server_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body("model overloaded")
        .create_async()
        .await;

    let client = OpenAIClient::new(server.url(), "gsk-test");
    let result = client.complete_with_system("s", "p", &options()).await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "API returned error: 503 - model overloaded");
    assert!(matches!(err, LLMError::ApiError { status: 503, .. }));
}

#[tokio::test]
async fn test_chat_completion_malformed_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let client = OpenAIClient::new(server.url(), "gsk-test");
    let result = client.complete_with_system("s", "p", &options()).await;

    assert!(matches!(result, Err(LLMError::ParseError(_))));
}
