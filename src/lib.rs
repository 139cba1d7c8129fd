//! # blockforge
//!
//! An AI gateway that turns natural-language prompts into WordPress block
//! markup via OpenAI's Chat Completions and Responses APIs.
//!
//! The slow part of every generation is the provider call, which can take
//! minutes. The gateway therefore fronts it with an asynchronous job
//! pipeline: `POST /v1/generate` enqueues a job into a TTL-bounded store,
//! a resident worker task executes it, and callers poll `GET /v1/jobs/{id}`
//! for the result. Synchronous generation and a form-encoded fallback path
//! are available for callers that prefer to wait.
//!
//! Model output is normalized before it is returned: markdown fences are
//! stripped, inline CSS shorthand is expanded, known-required block
//! classes are patched in, and the markup is round-tripped through the
//! block grammar so the editor's validator accepts it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use blockforge::config::Config;
//! use blockforge::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     HttpServer::new(config)?.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use core::jobs::{JobRecord, JobRunner, JobStatus, JobStore, WorkerHandle};
pub use core::normalize::normalize_generated_code;
pub use core::profile::{ModelProfile, profile_for};
pub use core::provider::{OpenAiHttpClient, ProviderClient, ProviderError, RawResponse};
pub use core::types::{ApiFamily, GenerationRequest, GenerationResult, ImageRef, Usage};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
