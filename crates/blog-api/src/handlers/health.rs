//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, http::StatusCode, Json};
use blog_service::dto::{HealthResponse, CheckStatus, ReadinessResponse};
use tracing::warn;

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET /health/ready
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let database: CheckStatus = blog_db::health_check(state.pool())
        .await
        .inspect_err(|e| warn!(error = %e, "PostgreSQL readiness check failed"))
        .is_ok()
        .into();

    let redis: CheckStatus = state
        .redis_pool()
        .health_check()
        .await
        .inspect_err(|e| warn!(error = %e, "Redis readiness check failed"))
        .is_ok()
        .into();

    let response = ReadinessResponse::new(database, redis);
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
