//! Integration tests for GroqChatClient using wiremock.

use weatherbot_core::{ChatClient, ChatError, GroqChatClient, config::LlmSettings};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GroqChatClient {
    let settings = LlmSettings { base_url: server.uri(), ..LlmSettings::default() };
    GroqChatClient::from_settings("gsk-test".to_string(), &settings).unwrap()
}

fn completion(message: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.1-8b-instant",
        "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }]
    })
}

#[tokio::test]
async fn test_complete_sends_fixed_configuration() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "llama-3.1-8b-instant",
            "max_tokens": 256,
            "stream": false,
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "hello" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(serde_json::json!({
            "role": "assistant",
            "content": "Hi! Ask me about the weather."
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = client(&mock_server).complete("be brief", "hello").await.unwrap();

    assert_eq!(reply, "Hi! Ask me about the weather.");
}

#[tokio::test]
async fn test_complete_without_content_returns_message_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(serde_json::json!({
            "role": "assistant"
        }))))
        .mount(&mock_server)
        .await;

    let reply = client(&mock_server).complete("sys", "hello").await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value, serde_json::json!({ "role": "assistant" }));
}

#[tokio::test]
async fn test_complete_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": { "message": "Invalid API Key" }
        })))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).complete("sys", "hello").await.unwrap_err();

    match err {
        ChatError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API Key"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_error_status_truncates_long_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("x".repeat(1000)))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).complete("sys", "hello").await.unwrap_err();

    match err {
        ChatError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body.chars().count(), 203);
            assert!(body.ends_with("..."));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_empty_choices() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).complete("sys", "hello").await.unwrap_err();
    assert!(matches!(err, ChatError::EmptyResponse));
}

#[tokio::test]
async fn test_complete_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client(&mock_server).complete("sys", "hello").await.unwrap_err();
    assert!(matches!(err, ChatError::Json(_)));
}
