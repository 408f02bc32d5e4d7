use axum::routing::get;
use axum::Router;

use crate::handlers::tracking;
use crate::state::AppState;

/// QR redirect routes (root level, NOT under `/api/v1`; the printed codes
/// must stay short).
pub fn router() -> Router<AppState> {
    Router::new().route("/r/{tracking_code}", get(tracking::follow_qr_code))
}
