//! Job record types

use crate::core::types::GenerationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Enqueued, not yet claimed by a runner
    Queued,
    /// A runner has claimed the job and is generating
    Processing,
    /// Generation finished with a result
    Done,
    /// Canceled before or during execution
    Canceled,
    /// Generation failed
    Error,
}

impl JobStatus {
    /// Terminal states are immutable until the record expires
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Canceled | JobStatus::Error)
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Done => "done",
            JobStatus::Canceled => "canceled",
            JobStatus::Error => "error",
        }
    }
}

/// Mutable status record for one job
///
/// The write-once payload lives under its own store key so it can be
/// purged on terminal transition while the status persists until expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    /// Opaque job token
    pub id: String,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Enqueue time
    pub created_at: DateTime<Utc>,
    /// Terminal-transition time
    pub finished_at: Option<DateTime<Utc>>,
    /// Generation outcome, set on `done` and `error`
    pub result: Option<GenerationResult>,
}

impl JobRecord {
    /// Fresh queued record
    pub fn queued(id: String) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            created_at: Utc::now(),
            finished_at: None,
            result: None,
        }
    }
}
