//! Device-facing routes mounted at `/tv`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::device;
use crate::state::AppState;

/// ```text
/// POST /poll                     -> poll
/// POST /exhibition-log           -> log_exhibition
/// GET  /schedule/{external_id}   -> schedule_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/poll", post(device::poll))
        .route("/exhibition-log", post(device::log_exhibition))
        .route("/schedule/{external_id}", get(device::schedule_check))
}
