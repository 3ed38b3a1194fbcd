//! OpenAiSummarizer against a mock chat-completions server

use kodegen_tools_autosearch::summarizer::{CompletionRequest, OpenAiSummarizer, Summarizer, SummaryError};
use mockito::Matcher;
use serde_json::json;

fn request() -> CompletionRequest {
    CompletionRequest {
        system: "system prompt".to_string(),
        user: "summarize this".to_string(),
        max_tokens: 1000,
        temperature: 0.3,
    }
}

#[tokio::test]
async fn test_complete_posts_chat_request_and_trims_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 1000,
            "messages": [
                {"role": "system", "content": "system prompt"},
                {"role": "user", "content": "summarize this"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"content": "  A summary.\n"}}]}).to_string())
        .create_async()
        .await;

    let summarizer = OpenAiSummarizer::new("test-key", server.url(), "gpt-4o-mini");
    assert_eq!(summarizer.model(), "gpt-4o-mini");
    assert_eq!(summarizer.base_url(), server.url());
    let text = summarizer.complete(&request()).await.expect("completion");

    assert_eq!(text, "A summary.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let summarizer = OpenAiSummarizer::new("k", server.url(), "m");
    let err = summarizer.complete(&request()).await.expect_err("429");

    match err {
        SummaryError::Status { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_blank_completion_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "   "}}]}).to_string())
        .create_async()
        .await;

    let summarizer = OpenAiSummarizer::new("k", server.url(), "m");
    let err = summarizer.complete(&request()).await.expect_err("empty");
    assert!(matches!(err, SummaryError::EmptyResponse));
}

#[tokio::test]
async fn test_verify_counts_models() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .match_header("authorization", "Bearer k")
        .with_status(200)
        .with_body(json!({"data": [{"id": "a"}, {"id": "b"}]}).to_string())
        .create_async()
        .await;

    // trailing slash on the base URL is tolerated
    let summarizer = OpenAiSummarizer::new("k", format!("{}/", server.url()), "m");
    assert_eq!(summarizer.verify().await.expect("verify"), 2);
}

#[tokio::test]
async fn test_verify_rejects_bad_key() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v1/models")
        .with_status(401)
        .with_body("invalid key")
        .create_async()
        .await;

    let summarizer = OpenAiSummarizer::new("bad", server.url(), "m");
    assert!(matches!(
        summarizer.verify().await,
        Err(SummaryError::Status { .. })
    ));
}
