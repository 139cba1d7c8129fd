//! HTTP route modules

pub mod generate;
pub mod health;
pub mod jobs;

use crate::config::AuthConfig;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, web};

/// Configure all routes on a service config
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .route("/generate", web::post().to(generate::generate))
            .route("/test-connection", web::post().to(generate::test_connection))
            .route("/jobs", web::get().to(jobs::list_jobs))
            .route("/jobs/{id}", web::get().to(jobs::get_job))
            .route("/jobs/{id}/cancel", web::post().to(jobs::cancel_job))
            .route("/jobs/{id}/delete", web::post().to(jobs::delete_job))
            .route("/jobs/{id}/run", web::post().to(jobs::run_job)),
    )
    .route(
        "/fallback/generate",
        web::post().to(generate::generate_fallback),
    )
    .route("/health", web::get().to(health::health_check));
}

/// Bearer-token permission check
///
/// Open when no token is configured; otherwise the Authorization header
/// must carry exactly the configured token.
pub fn authorize(req: &HttpRequest, auth: &AuthConfig) -> Result<(), GatewayError> {
    let Some(expected) = auth.token.as_deref() else {
        return Ok(());
    };

    let provided = req
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => Err(GatewayError::Unauthorized(
            "Missing or invalid bearer token".to_string(),
        )),
    }
}
