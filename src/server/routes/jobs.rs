//! Job management endpoints

use crate::server::AppState;
use crate::server::routes::authorize;
use crate::utils::error::GatewayError;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use tracing::debug;

/// Number of records returned by the listing endpoint
const LIST_LIMIT: usize = 50;

/// Poll one job's status and result
pub async fn get_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    let record = state
        .runner
        .poll(&id)
        .ok_or_else(|| GatewayError::NotFound(format!("job {}", id)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": record.status,
        "result": record.result,
    })))
}

/// Recent jobs, newest first (operator view)
pub async fn list_jobs(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    let jobs = state.runner.store().list_recent(LIST_LIMIT);
    debug!(count = jobs.len(), "Listing recent jobs");
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "jobs": jobs,
    })))
}

/// Cancel a job unless it is already terminal
pub async fn cancel_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    let record = state
        .runner
        .cancel(&id)
        .ok_or_else(|| GatewayError::NotFound(format!("job {}", id)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": record.status,
    })))
}

/// Purge a job unconditionally
pub async fn delete_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    state.runner.delete(&id);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deleted": true,
    })))
}

/// Force synchronous execution of a queued job
///
/// Operational escape hatch for when the background worker is wedged or
/// the job was enqueued by an external tool.
pub async fn run_job(
    state: web::Data<AppState>,
    req: HttpRequest,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    authorize(&req, &state.config.auth)?;

    let record = state
        .runner
        .run_job(&id)
        .await
        .ok_or_else(|| GatewayError::NotFound(format!("job {}", id)))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "status": record.status,
        "result": record.result,
    })))
}
