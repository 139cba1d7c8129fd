//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::jobs::{JobRunner, WorkerHandle};
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are cheap to clone; the heavy pieces sit behind Arc.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Job runner over the shared store and provider client
    pub runner: Arc<JobRunner>,
    /// Dispatch handle for the background worker
    pub worker: WorkerHandle,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Arc<Config>, runner: Arc<JobRunner>, worker: WorkerHandle) -> Self {
        Self {
            config,
            runner,
            worker,
        }
    }
}
