//! OpenAI provider plumbing
//!
//! Request shaping, the outbound HTTP client, response extraction, and the
//! provider error taxonomy.

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::{OpenAiHttpClient, ProviderClient, RawResponse};
pub use error::{ProviderError, classify_api_error};
pub use request::{Endpoint, ProviderRequest, build_provider_request, select_family};
pub use response::{Extracted, extract_generated_text};
