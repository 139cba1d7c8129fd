//! Job execution
//!
//! Runs the full generation pipeline for a job id, writing status
//! transitions into the store. The Queued→Processing claim is a
//! compare-and-swap under the store's entry lock, so a racing manual run
//! and worker run cannot both contact the provider. Terminal writes honor
//! a cancel that landed while the provider call was in flight.

use crate::config::Config;
use crate::core::jobs::store::JobStore;
use crate::core::jobs::types::{JobRecord, JobStatus};
use crate::core::normalize::normalize_generated_code;
use crate::core::profile::profile_for;
use crate::core::prompt::compose_system_prompt;
use crate::core::provider::error::empty_response_error;
use crate::core::provider::{
    Endpoint, ProviderClient, ProviderError, build_provider_request, classify_api_error,
    extract_generated_text, select_family,
};
use crate::core::types::{ApiFamily, GenerationRequest, GenerationResult, Usage};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Total provider attempts per generation: one call plus up to two
/// empty-output retries
const MAX_ATTEMPTS: u32 = 3;

/// Outcome of a claim attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Claimed,
    AlreadyRunning,
    Terminal(JobStatus),
}

/// Executes generations and drives job state
pub struct JobRunner {
    config: Arc<Config>,
    store: Arc<JobStore>,
    client: Arc<dyn ProviderClient>,
}

impl JobRunner {
    /// Build a runner over the shared store and provider client
    pub fn new(config: Arc<Config>, store: Arc<JobStore>, client: Arc<dyn ProviderClient>) -> Self {
        Self {
            config,
            store,
            client,
        }
    }

    /// The shared job store
    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Create a queued job and persist its payload; returns immediately
    pub fn enqueue(&self, request: GenerationRequest) -> JobRecord {
        let id = Uuid::new_v4().to_string();
        let record = JobRecord::queued(id.clone());
        self.store.put_record(record.clone());
        self.store.put_payload(&id, request);
        info!(job_id = %id, "Job enqueued");
        record
    }

    /// Read current status/result without side effects
    pub fn poll(&self, id: &str) -> Option<JobRecord> {
        self.store.get_record(id)
    }

    /// Cancel a job unless it is already terminal; purges the payload
    pub fn cancel(&self, id: &str) -> Option<JobRecord> {
        let record = self.store.with_record_mut(id, |record| {
            if !record.status.is_terminal() {
                record.status = JobStatus::Canceled;
                record.finished_at = Some(Utc::now());
            }
            record.clone()
        })?;
        self.store.delete_payload(id);
        info!(job_id = %id, status = record.status.as_str(), "Job cancel requested");
        Some(record)
    }

    /// Purge both keys unconditionally
    pub fn delete(&self, id: &str) -> bool {
        let had_record = self.store.delete_record(id);
        self.store.delete_payload(id);
        had_record
    }

    /// Execute a queued job to a terminal state
    ///
    /// Idempotent against duplicate invocation: a job that is unknown,
    /// expired, already running, or terminal is a no-op. Returns the
    /// record as this call left it.
    pub async fn run_job(&self, id: &str) -> Option<JobRecord> {
        let claim = self.store.with_record_mut(id, |record| match record.status {
            JobStatus::Queued => {
                record.status = JobStatus::Processing;
                Claim::Claimed
            }
            JobStatus::Processing => Claim::AlreadyRunning,
            status => Claim::Terminal(status),
        })?;

        match claim {
            Claim::Claimed => {}
            Claim::AlreadyRunning => {
                debug!(job_id = %id, "Job already processing, skipping duplicate trigger");
                return self.store.get_record(id);
            }
            Claim::Terminal(status) => {
                debug!(job_id = %id, status = status.as_str(), "Job already terminal, skipping");
                return self.store.get_record(id);
            }
        }

        info!(job_id = %id, "Job claimed, generating");

        let result = match self.store.get_payload(id) {
            Some(payload) => self.generate(&payload).await,
            None => {
                warn!(job_id = %id, "Job payload missing or expired");
                GenerationResult::failed(
                    "Job payload is missing or expired".to_string(),
                    &self.config.provider.model,
                    ApiFamily::Chat,
                )
            }
        };

        self.finish(id, result)
    }

    /// Write the terminal record, honoring a cancel that raced the run
    fn finish(&self, id: &str, result: GenerationResult) -> Option<JobRecord> {
        let record = self.store.with_record_mut(id, |record| {
            if record.status == JobStatus::Canceled {
                return record.clone();
            }
            record.status = if result.success {
                JobStatus::Done
            } else {
                JobStatus::Error
            };
            record.finished_at = Some(Utc::now());
            record.result = Some(result.clone());
            record.clone()
        });
        self.store.delete_payload(id);

        if let Some(record) = &record {
            info!(job_id = %id, status = record.status.as_str(), "Job finished");
        }
        record
    }

    /// Run one generation synchronously: compose, build, call, normalize
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationResult {
        let model = self.config.provider.model.clone();
        let profile = profile_for(&model);
        let family = select_family(
            &profile,
            self.config.provider.api_mode,
            !request.images.is_empty(),
        );

        if self.config.provider.api_key.trim().is_empty() {
            warn!("Generation rejected: no API key configured");
            let err = ProviderError::MissingApiKey;
            return GenerationResult::failed_with_code(err.code(), err.to_string(), &model, family);
        }

        let prompt = compose_system_prompt(request, &self.config.generation, &profile);
        debug!(
            prompt_bytes = prompt.byte_len,
            preview = %prompt.preview,
            "Composed system prompt"
        );

        let built = build_provider_request(
            &model,
            &prompt,
            request,
            &self.config.generation,
            &self.config.media,
            self.config.provider.api_mode,
            &profile,
        );

        match self.call_with_retry(&built.body, built.endpoint, built.family).await {
            Ok((content, usage)) => {
                let code = normalize_generated_code(&content);
                GenerationResult::ok(code, &model, built.family, usage)
            }
            Err(err) => {
                warn!(code = err.code(), "Generation failed: {}", err);
                GenerationResult::failed_with_code(err.code(), err.to_string(), &model, built.family)
            }
        }
    }

    /// One-shot minimal provider round trip, used by the settings screen
    /// to verify a key/model combination
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.config.provider.api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let model = &self.config.provider.model;
        let profile = profile_for(model);

        let mut body = serde_json::json!({
            "model": model,
            "messages": [ { "role": "user", "content": "Reply with the single word: ok" } ],
        });
        body[profile.token_limit_param.as_str()] = serde_json::json!(20);
        if !profile.temperature_locked {
            body["temperature"] = serde_json::json!(self.config.generation.temperature);
        }

        let raw = self.client.post(Endpoint::ChatCompletions, &body).await?;
        if raw.status != 200 {
            return Err(classify_api_error(raw.status, &raw.body));
        }
        Ok(())
    }

    /// Call the provider, retrying the identical request on empty output
    ///
    /// Transport failures and non-200 answers are not retried; only the
    /// 200-with-blank-content anomaly is, up to two extra attempts.
    async fn call_with_retry(
        &self,
        body: &serde_json::Value,
        endpoint: Endpoint,
        family: ApiFamily,
    ) -> Result<(String, Option<Usage>), ProviderError> {
        let mut last_raw_body = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            let raw = self.client.post(endpoint, body).await?;

            if raw.status != 200 {
                return Err(classify_api_error(raw.status, &raw.body));
            }

            let value: serde_json::Value = serde_json::from_str(&raw.body)
                .map_err(|e| ProviderError::ResponseParsing(e.to_string()))?;
            let extracted = extract_generated_text(family, &value);

            if !extracted.content.is_empty() {
                return Ok((extracted.content, extracted.usage));
            }

            warn!(attempt, "Provider returned empty content");
            last_raw_body = raw.body;
        }

        Err(empty_response_error(&last_raw_body))
    }
}
