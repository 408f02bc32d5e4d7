//! Handlers for the monitoring surface.
//!
//! All endpoints require [`RequireMonitorKey`].

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::exhibition::{ExhibitionTotals, MediaExhibitionCount};
use vitrine_db::repositories::{DeviceRepo, ExhibitionLogRepo};

use crate::engine::status::device_status;
use crate::error::AppResult;
use crate::middleware::monitor_key::RequireMonitorKey;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default and maximum size of the top-media list.
const DEFAULT_TOP_MEDIA: i64 = 10;
const MAX_TOP_MEDIA: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub top: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ExhibitionStats {
    pub device_id: DbId,
    #[serde(flatten)]
    pub totals: ExhibitionTotals,
    pub top_media: Vec<MediaExhibitionCount>,
}

/// GET /api/v1/monitor/devices
pub async fn list_devices(
    _key: RequireMonitorKey,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let at = state.now();
    let devices = DeviceRepo::list(&state.pool).await?;

    let mut views = Vec::with_capacity(devices.len());
    for device in devices {
        views.push(device_status(&state.pool, device, at).await?);
    }

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/monitor/devices/{id}/status
pub async fn get_device_status(
    _key: RequireMonitorKey,
    State(state): State<AppState>,
    Path(device_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let device = DeviceRepo::find_by_id(&state.pool, device_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Device",
            id: device_id,
        })?;
    let view = device_status(&state.pool, device, state.now()).await?;

    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/monitor/devices/{id}/exhibitions/stats
///
/// Totals over the device's history plus the most exhibited media items.
pub async fn exhibition_stats(
    _key: RequireMonitorKey,
    State(state): State<AppState>,
    Path(device_id): Path<DbId>,
    Query(params): Query<StatsParams>,
) -> AppResult<impl IntoResponse> {
    DeviceRepo::find_by_id(&state.pool, device_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Device",
            id: device_id,
        })?;

    let top = params.top.unwrap_or(DEFAULT_TOP_MEDIA).clamp(1, MAX_TOP_MEDIA);
    let (totals, top_media) = tokio::try_join!(
        ExhibitionLogRepo::totals_for_device(&state.pool, device_id),
        ExhibitionLogRepo::top_media_for_device(&state.pool, device_id, top),
    )?;

    Ok(Json(DataResponse {
        data: ExhibitionStats {
            device_id,
            totals,
            top_media,
        },
    }))
}
