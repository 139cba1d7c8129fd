//! HTTP surface tests
//!
//! Drives the actix routes end to end with a wiremock provider behind the
//! runner and a live worker task consuming the dispatch channel.

use crate::common::{runner_against, test_config};
use actix_web::{App, test, web};
use blockforge::config::Config;
use blockforge::core::jobs::WorkerHandle;
use blockforge::server::{AppState, routes};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_provider(content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
            ],
            "usage": { "prompt_tokens": 5, "completion_tokens": 5, "total_tokens": 10 },
        })))
        .mount(&server)
        .await;
    server
}

fn state_for(config: Config) -> AppState {
    let config = Arc::new(config);
    let runner = runner_against((*config).clone());
    let worker = WorkerHandle::spawn(Arc::clone(&runner));
    AppState::new(config, runner, worker)
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_endpoint_reports_service() {
    let server = mock_provider("<p>x</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let response: serde_json::Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
    assert_eq!(response["status"], "healthy");
    assert_eq!(response["service"], "blockforge");
}

#[actix_web::test]
async fn sync_generate_returns_the_result_shape() {
    let server = mock_provider("<p>sync</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let request = test::TestRequest::post()
        .uri("/v1/generate")
        .set_json(json!({ "prompt": "a paragraph", "async": false }))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["code"], "<p>sync</p>");
    assert_eq!(response["api_family"], "chat");
    assert_eq!(response["usage"]["total_tokens"], 10);
}

#[actix_web::test]
async fn async_generate_enqueues_and_the_worker_finishes_it() {
    let server = mock_provider("<p>async</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let request = test::TestRequest::post()
        .uri("/v1/generate")
        .set_json(json!({ "prompt": "a paragraph" }))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["async"], true);
    let job_id = response["job_id"].as_str().unwrap().to_string();

    // Poll until the worker drives the job terminal.
    let mut status = String::new();
    for _ in 0..100 {
        let poll = test::TestRequest::get()
            .uri(&format!("/v1/jobs/{}", job_id))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, poll).await;
        status = body["status"].as_str().unwrap_or_default().to_string();
        if status == "done" || status == "error" {
            assert_eq!(body["result"]["code"], "<p>async</p>");
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(status, "done");
}

#[actix_web::test]
async fn empty_prompt_is_rejected() {
    let server = mock_provider("<p>x</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let request = test::TestRequest::post()
        .uri("/v1/generate")
        .set_json(json!({ "prompt": "   " }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
async fn bearer_token_gates_the_v1_routes() {
    let server = mock_provider("<p>x</p>").await;
    let mut config = test_config(&server.uri());
    config.auth.token = Some("sekret".to_string());
    let app = test_app!(state_for(config));

    let request = test::TestRequest::post()
        .uri("/v1/generate")
        .set_json(json!({ "prompt": "x", "async": false }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 401);

    let request = test::TestRequest::post()
        .uri("/v1/generate")
        .insert_header(("Authorization", "Bearer sekret"))
        .set_json(json!({ "prompt": "x", "async": false }))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["success"], true);
}

#[actix_web::test]
async fn fallback_form_path_matches_the_result_shape() {
    let server = mock_provider("<p>fallback</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let request = test::TestRequest::post()
        .uri("/fallback/generate")
        .set_form([
            ("prompt", "a paragraph"),
            ("images", r#"[{"url":"https://example.com/a.png"}]"#),
        ])
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["code"], "<p>fallback</p>");
}

#[actix_web::test]
async fn cancel_and_delete_endpoints_manage_jobs() {
    let server = mock_provider("<p>x</p>").await;
    let state = state_for(test_config(&server.uri()));
    // Enqueue directly so the worker never sees the job.
    let record = state
        .runner
        .enqueue(blockforge::core::types::GenerationRequest::text("x"));
    let app = test_app!(state);

    let request = test::TestRequest::post()
        .uri(&format!("/v1/jobs/{}/cancel", record.id))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["success"], true);
    assert_eq!(response["status"], "canceled");

    let request = test::TestRequest::post()
        .uri(&format!("/v1/jobs/{}/delete", record.id))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;
    assert_eq!(response["deleted"], true);

    let request = test::TestRequest::get()
        .uri(&format!("/v1/jobs/{}", record.id))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn manual_run_forces_a_queued_job_to_done() {
    let server = mock_provider("<p>forced</p>").await;
    let state = state_for(test_config(&server.uri()));
    let record = state
        .runner
        .enqueue(blockforge::core::types::GenerationRequest::text("x"));
    let app = test_app!(state);

    let request = test::TestRequest::post()
        .uri(&format!("/v1/jobs/{}/run", record.id))
        .to_request();
    let response: serde_json::Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(response["success"], true);
    assert_eq!(response["status"], "done");
    assert_eq!(response["result"]["code"], "<p>forced</p>");
}

#[actix_web::test]
async fn jobs_listing_returns_recent_records() {
    let server = mock_provider("<p>x</p>").await;
    let state = state_for(test_config(&server.uri()));
    state
        .runner
        .enqueue(blockforge::core::types::GenerationRequest::text("one"));
    state
        .runner
        .enqueue(blockforge::core::types::GenerationRequest::text("two"));
    let app = test_app!(state);

    let response: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/v1/jobs").to_request(),
    )
    .await;
    assert_eq!(response["success"], true);
    assert_eq!(response["jobs"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn unknown_job_polls_as_not_found() {
    let server = mock_provider("<p>x</p>").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let request = test::TestRequest::get()
        .uri("/v1/jobs/does-not-exist")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status().as_u16(), 404);
}

#[actix_web::test]
async fn test_connection_round_trips() {
    let server = mock_provider("ok").await;
    let app = test_app!(state_for(test_config(&server.uri())));

    let response: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/v1/test-connection")
            .to_request(),
    )
    .await;
    assert_eq!(response["success"], true);
}
