use std::time::Duration;

use httpmock::prelude::*;
use legal_notice_server::completion::{CompletionError, CompletionService, GroqClient};
use legal_notice_server::config::CompletionConfig;
use serde_json::json;

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn client_for(server: &MockServer, max_retries: u32) -> GroqClient {
    let mut config = CompletionConfig::new("test-key");
    config.api_url = server.url(COMPLETIONS_PATH);
    config.max_retries = max_retries;
    GroqClient::new(&config)
        .unwrap()
        .with_base_delay(Duration::from_millis(5))
}

#[tokio::test]
async fn test_complete_returns_first_choice() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(COMPLETIONS_PATH)
                .header("authorization", "Bearer test-key")
                .json_body_partial(
                    r#"{
                        "model": "llama-3.3-70b-versatile",
                        "messages": [{"role": "user", "content": "Draft the notice"}]
                    }"#,
                );
            then.status(200).json_body(json!({
                "choices": [
                    {"message": {"role": "assistant", "content": "Dear Jane Roe,"}},
                    {"message": {"role": "assistant", "content": "second choice"}}
                ]
            }));
        })
        .await;

    let client = client_for(&server, 2);
    let text = client.complete("Draft the notice").await.unwrap();

    assert_eq!(text, "Dear Jane Roe,");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(503).body("upstream overloaded");
        })
        .await;

    let client = client_for(&server, 2);
    let err = client.complete("Draft the notice").await.unwrap_err();

    assert!(matches!(err, CompletionError::Server { status: 503, .. }));
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_rate_limit_is_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(429).body("slow down");
        })
        .await;

    let client = client_for(&server, 1);
    let err = client.complete("Draft the notice").await.unwrap_err();

    assert!(matches!(err, CompletionError::RateLimited));
    mock.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(401).json_body(json!({"error": {"message": "Invalid API Key"}}));
        })
        .await;

    let client = client_for(&server, 2);
    let err = client.complete("Draft the notice").await.unwrap_err();

    assert!(matches!(err, CompletionError::Unauthorized(401)));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_empty_choices_is_malformed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let client = client_for(&server, 2);
    let err = client.complete("Draft the notice").await.unwrap_err();

    assert!(matches!(err, CompletionError::Malformed(_)));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200).body("<html>gateway</html>");
        })
        .await;

    let client = client_for(&server, 0);
    let err = client.complete("Draft the notice").await.unwrap_err();

    assert!(matches!(err, CompletionError::Malformed(_)));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(COMPLETIONS_PATH);
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"choices": [{"message": {"content": "late"}}]}));
        })
        .await;

    let mut config = CompletionConfig::new("test-key");
    config.api_url = server.url(COMPLETIONS_PATH);
    config.max_retries = 0;
    config.timeout = Duration::from_millis(100);
    let client = GroqClient::new(&config).unwrap();

    let err = client.complete("Draft the notice").await.unwrap_err();
    assert!(matches!(err, CompletionError::Timeout));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    let mut config = CompletionConfig::new("test-key");
    config.api_url = "http://127.0.0.1:9/openai/v1/chat/completions".to_string();
    config.max_retries = 0;
    let client = GroqClient::new(&config).unwrap();

    let err = client.complete("Draft the notice").await.unwrap_err();
    assert!(err.is_transient());
}
