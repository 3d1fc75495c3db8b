//! Health check endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Readiness of the service and its MongoDB connection
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadyResponse {
    /// `ready` or `unhealthy`
    pub status: String,
    pub mongodb: bool,
    /// Round-trip time of the MongoDB ping
    pub latency_ms: u64,
}

/// Create a health check router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Readiness check - verifies MongoDB connection
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "MongoDB answered a ping", body = ReadyResponse),
        (status = 503, description = "MongoDB is unreachable", body = ReadyResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let health = database::mongodb::check_health_detailed(&state.mongo_client).await;

    if !health.healthy {
        tracing::warn!(message = ?health.message, "MongoDB not ready");
    }

    let status = if health.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadyResponse {
            status: if health.healthy { "ready" } else { "unhealthy" }.to_string(),
            mongodb: health.healthy,
            latency_ms: health.response_time_ms,
        }),
    )
}
