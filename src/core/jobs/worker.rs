//! Background worker
//!
//! The single dispatch path for queued jobs: enqueue sends the job id over
//! an unbounded channel, one resident task drains it and drives each job
//! to a terminal state. The runner's claim logic keeps duplicate triggers
//! (e.g. a manual run racing the worker) harmless.

use crate::core::jobs::runner::JobRunner;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Handle for dispatching job ids to the worker task
#[derive(Clone)]
pub struct WorkerHandle {
    tx: mpsc::UnboundedSender<String>,
}

impl WorkerHandle {
    /// Spawn the worker task and return its dispatch handle
    pub fn spawn(runner: Arc<JobRunner>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        tokio::spawn(async move {
            while let Some(job_id) = rx.recv().await {
                debug!(%job_id, "Worker picked up job");
                runner.run_job(&job_id).await;
            }
            debug!("Worker channel closed, task exiting");
        });

        Self { tx }
    }

    /// Best-effort dispatch; a queued job stays runnable via the manual
    /// run endpoint even if the worker is gone
    pub fn dispatch(&self, job_id: &str) {
        if self.tx.send(job_id.to_string()).is_err() {
            warn!(%job_id, "Worker channel closed; job stays queued until run manually");
        }
    }
}
