//! Asynchronous job pipeline
//!
//! Decouples request submission from the multi-minute provider call: jobs
//! are enqueued into a TTL store, dispatched over a channel to a resident
//! worker task, and polled by callers until terminal.

pub mod runner;
pub mod store;
pub mod types;
pub mod worker;

pub use runner::JobRunner;
pub use store::JobStore;
pub use types::{JobRecord, JobStatus};
pub use worker::WorkerHandle;
