//! Handlers for the device-facing endpoints.
//!
//! Devices identify themselves by external id (poll, schedule check) or by
//! internal id (exhibition log). There is no other authentication.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vitrine_core::types::DbId;

use crate::engine::exhibition::{self, ExhibitionReport};
use crate::engine::{poll, schedule_check};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PollRequest {
    pub external_id: String,
    pub client_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExhibitionLogRequest {
    pub device_id: DbId,
    pub media_item_id: DbId,
    pub elapsed_secs: i64,
}

/// POST /api/v1/tv/poll
///
/// Record the heartbeat and return what the device should play now.
pub async fn poll(
    State(state): State<AppState>,
    Json(input): Json<PollRequest>,
) -> AppResult<impl IntoResponse> {
    let response =
        poll::serve_poll(&state, &input.external_id, input.client_version.as_deref()).await?;

    tracing::debug!(
        device_id = response.device_id,
        entries = response.entries.len(),
        content_available = response.content_available,
        "Poll served"
    );

    Ok(Json(DataResponse { data: response }))
}

/// POST /api/v1/tv/exhibition-log
pub async fn log_exhibition(
    State(state): State<AppState>,
    Json(input): Json<ExhibitionLogRequest>,
) -> AppResult<impl IntoResponse> {
    let report = ExhibitionReport {
        device_id: input.device_id,
        media_item_id: input.media_item_id,
        elapsed_secs: input.elapsed_secs,
    };
    let log = exhibition::record(&state.pool, report, state.now()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: log })))
}

/// GET /api/v1/tv/schedule/{external_id}
pub async fn schedule_check(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let check = schedule_check::check(&state.pool, &external_id, state.now()).await?;

    Ok(Json(DataResponse { data: check }))
}
