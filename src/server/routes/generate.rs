//! Generation endpoints
//!
//! `POST /v1/generate` is the primary path; `POST /fallback/generate` is a
//! form-encoded fallback for callers whose environment mangles JSON
//! bodies, accepting the same prompt/images pair and returning the same
//! result shape.

use crate::core::types::{GenerationRequest, ImageRef};
use crate::server::AppState;
use crate::server::routes::authorize;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Deserialize;
use tracing::{info, warn};

/// Form payload for the legacy fallback path; images arrive as a JSON
/// string because form encoding has no arrays
#[derive(Debug, Deserialize)]
pub struct FallbackForm {
    /// Prompt text
    pub prompt: String,
    /// JSON-encoded `ImageRef` array
    pub images: Option<String>,
}

/// Primary generation endpoint
pub async fn generate(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerationRequest>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;
    let request = request.into_inner();
    validate_prompt(&request.prompt)?;

    info!(
        images = request.images.len(),
        async_mode = request.async_mode,
        "Generate request received"
    );

    if request.async_mode {
        let record = state.runner.enqueue(request);
        state.worker.dispatch(&record.id);
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "async": true,
            "job_id": record.id,
        })));
    }

    let result = state.runner.generate(&request).await;
    Ok(HttpResponse::Ok().json(result))
}

/// Legacy form-encoded fallback, always synchronous
pub async fn generate_fallback(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<FallbackForm>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;
    let form = form.into_inner();
    validate_prompt(&form.prompt)?;

    let images: Vec<ImageRef> = form
        .images
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();

    info!(images = images.len(), "Fallback generate request received");

    let request = GenerationRequest {
        prompt: form.prompt,
        images,
        async_mode: false,
    };
    let result = state.runner.generate(&request).await;
    Ok(HttpResponse::Ok().json(result))
}

/// Minimal provider round trip for the settings screen
pub async fn test_connection(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    match state.runner.test_connection().await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Connection successful",
        }))),
        Err(err) => {
            warn!(code = err.code(), "Connection test failed: {}", err);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": false,
                "error": { "code": err.code(), "message": err.to_string() },
            })))
        }
    }
}

fn validate_prompt(prompt: &str) -> Result<(), GatewayError> {
    if prompt.trim().is_empty() {
        return Err(GatewayError::Validation(
            "prompt must not be empty".to_string(),
        ));
    }
    Ok(())
}
