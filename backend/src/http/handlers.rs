//! HTTP handlers for the REST API.
//!
//! Each handler parses its inputs, delegates to [`crate::db::services`] and
//! maps the outcome onto a status code.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{
    CreateEstateRequest, CreateEstateResponse, CreateTreeRequest, CreateTreeResponse, DronePlan,
    EstateStats, HealthResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::EstateId;
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_estate_id(raw: &str) -> Result<EstateId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid estate id: {}", raw)))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        debug!("Rejected request body: {}", rejection);
        AppError::BadRequest("Invalid input".to_string())
    })
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Estates
// =============================================================================

/// POST /estate
pub async fn create_estate(
    State(state): State<AppState>,
    body: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEstateResponse>), AppError> {
    let request = json_body(body)?;
    let id = services::create_estate(state.repository.as_ref(), request.into()).await?;

    Ok((StatusCode::CREATED, Json(CreateEstateResponse { id })))
}

/// POST /estate/{estate_id}/tree
pub async fn create_tree(
    State(state): State<AppState>,
    Path(estate_id): Path<String>,
    body: Result<Json<CreateTreeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateTreeResponse>), AppError> {
    let estate_id = parse_estate_id(&estate_id)?;
    let request = json_body(body)?;
    let id = services::create_tree(state.repository.as_ref(), estate_id, request.into()).await?;

    Ok((StatusCode::CREATED, Json(CreateTreeResponse { id })))
}

/// GET /estate/{estate_id}/stats
pub async fn get_estate_stats(
    State(state): State<AppState>,
    Path(estate_id): Path<String>,
) -> HandlerResult<EstateStats> {
    let estate_id = parse_estate_id(&estate_id)?;
    let stats = services::get_estate_stats(state.repository.as_ref(), estate_id).await?;

    Ok(Json(stats))
}

/// GET /estate/{estate_id}/drone-plan
pub async fn get_drone_plan(
    State(state): State<AppState>,
    Path(estate_id): Path<String>,
) -> HandlerResult<DronePlan> {
    let estate_id = parse_estate_id(&estate_id)?;
    let plan = services::get_drone_plan(state.repository.as_ref(), estate_id).await?;

    Ok(Json(plan))
}
