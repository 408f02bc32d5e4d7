use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Liveness report for the signage service.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the schedule database cannot be reached and
    /// polls would fail.
    pub status: &'static str,
    /// Server build, compared against device `client_version` during rollouts.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Answers 200 even when degraded so load balancers keep routing heartbeats;
/// callers read `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vitrine_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mounted at the root, beside the device and monitoring APIs under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
