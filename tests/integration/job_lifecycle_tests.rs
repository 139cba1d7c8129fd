//! Job lifecycle tests
//!
//! Enqueue/poll/run/cancel/delete semantics, claim idempotence, and TTL
//! expiry, using scripted provider clients so no network is involved.

use crate::common::clients::{MockProvider, ScriptedClient, chat_body};
use crate::common::{runner_with_client, test_config};
use blockforge::core::jobs::{JobRunner, JobStatus, JobStore};
use blockforge::core::provider::RawResponse;
use blockforge::core::types::GenerationRequest;
use std::sync::Arc;
use std::time::Duration;

fn runner_with_script(client: Arc<ScriptedClient>) -> Arc<JobRunner> {
    runner_with_client(test_config("http://provider.invalid"), client)
}

#[tokio::test]
async fn enqueue_poll_run_done() {
    let client = Arc::new(ScriptedClient::ok("<p>done</p>"));
    let runner = runner_with_script(Arc::clone(&client));

    let record = runner.enqueue(GenerationRequest::text("x"));
    assert_eq!(record.status, JobStatus::Queued);

    // Polling before execution reports queued, without side effects.
    let polled = runner.poll(&record.id).unwrap();
    assert_eq!(polled.status, JobStatus::Queued);
    assert!(polled.result.is_none());

    let finished = runner.run_job(&record.id).await.unwrap();
    assert_eq!(finished.status, JobStatus::Done);

    let polled = runner.poll(&record.id).unwrap();
    assert_eq!(polled.status, JobStatus::Done);
    let result = polled.result.unwrap();
    assert!(result.success);
    assert_eq!(result.code, "<p>done</p>");
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn cancel_before_run_makes_zero_provider_calls() {
    // Strict mock: any post() call fails the test on drop.
    let mock = MockProvider::new();
    let runner = runner_with_client(test_config("http://provider.invalid"), Arc::new(mock));

    let record = runner.enqueue(GenerationRequest::text("x"));
    let canceled = runner.cancel(&record.id).unwrap();
    assert_eq!(canceled.status, JobStatus::Canceled);

    // Force-running a canceled job is a no-op.
    let after_run = runner.run_job(&record.id).await.unwrap();
    assert_eq!(after_run.status, JobStatus::Canceled);
    assert!(after_run.result.is_none());
}

#[tokio::test]
async fn duplicate_execution_yields_one_terminal_record_and_one_call() {
    let client = Arc::new(
        ScriptedClient::ok("<p>once</p>").with_delay(Duration::from_millis(100)),
    );
    let runner = runner_with_script(Arc::clone(&client));
    let record = runner.enqueue(GenerationRequest::text("x"));

    let first = {
        let runner = Arc::clone(&runner);
        let id = record.id.clone();
        tokio::spawn(async move { runner.run_job(&id).await })
    };
    let second = {
        let runner = Arc::clone(&runner);
        let id = record.id.clone();
        tokio::spawn(async move { runner.run_job(&id).await })
    };

    let (first, second) = (first.await.unwrap(), second.await.unwrap());
    assert!(first.is_some());
    assert!(second.is_some());

    // Exactly one claim won; the loser observed processing and backed off.
    assert_eq!(client.calls(), 1);
    let polled = runner.poll(&record.id).unwrap();
    assert_eq!(polled.status, JobStatus::Done);
}

#[tokio::test]
async fn cancel_during_processing_wins_over_the_late_result() {
    let client = Arc::new(
        ScriptedClient::ok("<p>late</p>").with_delay(Duration::from_millis(200)),
    );
    let runner = runner_with_script(Arc::clone(&client));
    let record = runner.enqueue(GenerationRequest::text("x"));

    let run = {
        let runner = Arc::clone(&runner);
        let id = record.id.clone();
        tokio::spawn(async move { runner.run_job(&id).await })
    };

    // Let the runner claim and start the provider call, then cancel.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let canceled = runner.cancel(&record.id).unwrap();
    assert_eq!(canceled.status, JobStatus::Canceled);

    run.await.unwrap();
    let polled = runner.poll(&record.id).unwrap();
    assert_eq!(polled.status, JobStatus::Canceled);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn failed_generation_lands_in_error_state() {
    let client = Arc::new(ScriptedClient::new(vec![RawResponse {
        status: 500,
        body: r#"{"error":{"message":"upstream exploded"}}"#.to_string(),
    }]));
    let runner = runner_with_script(client);
    let record = runner.enqueue(GenerationRequest::text("x"));

    let finished = runner.run_job(&record.id).await.unwrap();
    assert_eq!(finished.status, JobStatus::Error);
    let result = finished.result.unwrap();
    assert!(!result.success);
    assert!(result.error_message.unwrap().contains("upstream exploded"));
}

#[tokio::test]
async fn delete_purges_both_keys() {
    let client = Arc::new(ScriptedClient::ok("<p>x</p>"));
    let runner = runner_with_script(client);
    let record = runner.enqueue(GenerationRequest::text("x"));

    assert!(runner.delete(&record.id));
    assert!(runner.poll(&record.id).is_none());
    // Running a deleted job is a no-op.
    assert!(runner.run_job(&record.id).await.is_none());
}

#[tokio::test]
async fn expired_jobs_read_as_absent() {
    let client: Arc<ScriptedClient> = Arc::new(ScriptedClient::ok("<p>x</p>"));
    let store = Arc::new(JobStore::new(Duration::from_millis(0)));
    let runner = Arc::new(JobRunner::new(
        Arc::new(test_config("http://provider.invalid")),
        store,
        client,
    ));

    let record = runner.enqueue(GenerationRequest::text("x"));
    assert!(runner.poll(&record.id).is_none());
    assert!(runner.run_job(&record.id).await.is_none());
}

#[tokio::test]
async fn retry_script_is_replayed_through_the_job_path() {
    // Two blank answers then a real one: the job still lands in done.
    let client = Arc::new(ScriptedClient::new(vec![
        RawResponse { status: 200, body: chat_body("") },
        RawResponse { status: 200, body: chat_body("") },
        RawResponse { status: 200, body: chat_body("<p>third</p>") },
    ]));
    let runner = runner_with_script(Arc::clone(&client));
    let record = runner.enqueue(GenerationRequest::text("x"));

    let finished = runner.run_job(&record.id).await.unwrap();
    assert_eq!(finished.status, JobStatus::Done);
    assert_eq!(finished.result.unwrap().code, "<p>third</p>");
    assert_eq!(client.calls(), 3);
}
