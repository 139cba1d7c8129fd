//! Synchronous generation against a wiremock provider
//!
//! Exercises the full pipeline: prompt composition, request shaping, the
//! real reqwest client, empty-output retry, error classification, and
//! response normalization.

use crate::common::{clients, runner_against, test_config};
use blockforge::core::types::GenerationRequest;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-3.5-turbo",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 20, "completion_tokens": 10, "total_tokens": 30 },
    }))
}

#[tokio::test]
async fn sync_generation_normalizes_block_markup() {
    let server = MockServer::start().await;
    let raw = "```html\n<!-- wp:heading {\"level\":2} -->\n<h2 style=\"padding: 10px 20px\">Hi</h2>\n<!-- /wp:heading -->\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(raw))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_against(test_config(&server.uri()));
    let result = runner
        .generate(&GenerationRequest::text("a heading"))
        .await;

    assert!(result.success, "unexpected failure: {:?}", result.error_message);
    assert_eq!(
        result.code,
        "<!-- wp:heading {\"level\":2} -->\n<h2 class=\"wp-block-heading\" style=\"padding-top:10px;padding-right:20px;padding-bottom:10px;padding-left:20px;\">Hi</h2>\n<!-- /wp:heading -->"
    );
    assert_eq!(result.model_used, "gpt-3.5-turbo");
    assert_eq!(result.usage.unwrap().total_tokens, Some(30));
}

#[tokio::test]
async fn empty_output_retries_until_content_arrives() {
    let server = MockServer::start().await;
    // First two answers are blank; the third carries content.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(""))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response("<p>third time lucky</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_against(test_config(&server.uri()));
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(result.success);
    assert_eq!(result.code, "<p>third time lucky</p>");
}

#[tokio::test]
async fn persistent_empty_output_fails_after_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(""))
        .expect(3)
        .mount(&server)
        .await;

    let runner = runner_against(test_config(&server.uri()));
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("empty_response"));
}

#[tokio::test]
async fn rate_limit_is_classified_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "Rate limit reached for requests", "type": "requests" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let runner = runner_against(test_config(&server.uri()));
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("rate_limited"));
}

#[tokio::test]
async fn quota_errors_are_classified_separately() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "message": "You exceeded your current quota, please check your plan and billing details" }
        })))
        .mount(&server)
        .await;

    let runner = runner_against(test_config(&server.uri()));
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("quota_exceeded"));
}

#[tokio::test]
async fn missing_api_key_never_reaches_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(chat_response("nope"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.provider.api_key = String::new();
    let runner = runner_against(config);
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("no_api_key"));
}

#[tokio::test]
async fn reasoning_models_use_the_responses_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_string(clients::responses_body(
            "<!-- wp:paragraph -->\n<p>From responses</p>\n<!-- /wp:paragraph -->",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.provider.model = "gpt-5".to_string();
    let runner = runner_against(config);
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(result.success, "unexpected failure: {:?}", result.error_message);
    assert_eq!(result.api_family.as_str(), "responses");
    assert!(result.code.contains("<p>From responses</p>"));

    // The body must use the Responses field names, never the chat ones.
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("input").is_some());
    assert!(body.get("max_output_tokens").is_some());
    assert!(body.get("messages").is_none());
    assert!(body.get("max_tokens").is_none());
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn transport_failure_surfaces_as_network_error() {
    // Point at a closed port; reqwest fails to connect.
    let mut config = test_config("http://127.0.0.1:9");
    config.provider.request_timeout_secs = 2;
    let runner = runner_against(config);
    let result = runner.generate(&GenerationRequest::text("x")).await;

    assert!(!result.success);
    assert_eq!(result.error_code.as_deref(), Some("network_error"));
}
