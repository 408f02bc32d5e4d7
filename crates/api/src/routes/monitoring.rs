//! Monitoring routes mounted at `/monitor`.

use axum::routing::get;
use axum::Router;

use crate::handlers::monitoring;
use crate::state::AppState;

/// ```text
/// GET /devices                           -> list_devices
/// GET /devices/{id}/status               -> get_device_status
/// GET /devices/{id}/exhibitions/stats    -> exhibition_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/devices", get(monitoring::list_devices))
        .route("/devices/{id}/status", get(monitoring::get_device_status))
        .route(
            "/devices/{id}/exhibitions/stats",
            get(monitoring::exhibition_stats),
        )
}
