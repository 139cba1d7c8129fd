//! Provider client test doubles

use async_trait::async_trait;
use blockforge::core::provider::{Endpoint, ProviderError, ProviderClient, RawResponse};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Canned chat-completions body with the given content
pub fn chat_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-test",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15 },
    })
    .to_string()
}

/// Canned Responses-API body with the given output text
pub fn responses_body(content: &str) -> String {
    serde_json::json!({
        "id": "resp-test",
        "object": "response",
        "model": "gpt-test",
        "output": [
            {
                "type": "message",
                "role": "assistant",
                "content": [ { "type": "output_text", "text": content } ],
            }
        ],
        "usage": { "input_tokens": 10, "output_tokens": 5, "total_tokens": 15 },
    })
    .to_string()
}

/// Client that replays a scripted sequence of responses
///
/// The last response repeats once the script is exhausted. An optional
/// per-call delay makes races reproducible.
pub struct ScriptedClient {
    script: Mutex<VecDeque<RawResponse>>,
    last: RawResponse,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    /// Build from a response sequence; panics on an empty script
    pub fn new(responses: Vec<RawResponse>) -> Self {
        assert!(!responses.is_empty(), "script must not be empty");
        let last = responses.last().cloned().expect("non-empty");
        Self {
            script: Mutex::new(responses.into()),
            last,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Single 200 response with a chat body
    pub fn ok(content: &str) -> Self {
        Self::new(vec![RawResponse {
            status: 200,
            body: chat_body(content),
        }])
    }

    /// Add a per-call delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for ScriptedClient {
    async fn post(
        &self,
        _endpoint: Endpoint,
        _body: &serde_json::Value,
    ) -> Result<RawResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.script.lock().pop_front();
        Ok(next.unwrap_or_else(|| self.last.clone()))
    }
}

// Strict provider client mock, for call-count assertions: any post()
// without a matching expectation panics the test.
mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl ProviderClient for Provider {
        async fn post(
            &self,
            endpoint: Endpoint,
            body: &serde_json::Value,
        ) -> Result<RawResponse, ProviderError>;
    }
}
