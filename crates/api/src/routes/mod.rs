pub mod device;
pub mod health;
pub mod monitoring;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tv/poll                                  device poll (POST)
/// /tv/exhibition-log                        playback report (POST)
/// /tv/schedule/{external_id}                schedule diagnostic
///
/// /monitor/devices                          all devices with status (x-api-key)
/// /monitor/devices/{id}/status              one device's status
/// /monitor/devices/{id}/exhibitions/stats   exhibition totals and top media
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tv", device::router())
        .nest("/monitor", monitoring::router())
}
