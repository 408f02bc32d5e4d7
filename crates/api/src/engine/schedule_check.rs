//! Schedule diagnostic: what a device should be doing right now and why.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgPool;
use vitrine_core::operating_hours::OperatingWindow;
use vitrine_core::schedule::{ResolvedPlaylist, ScheduleBinding};
use vitrine_core::types::{DbId, Moment};

use super::poll::AuthenticatedDevice;
use super::snapshot;
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct ScheduleCheck {
    pub device_id: DbId,
    pub device_name: String,
    pub should_display: bool,
    /// Venue-local wall-clock time the decision was made at.
    pub current_time: NaiveDateTime,
    pub operating_windows: Vec<OperatingWindow>,
    pub active_bindings: Vec<ScheduleBinding>,
    pub resolved_playlists: Vec<ResolvedPlaylist>,
}

/// Authenticate (recording a heartbeat) and report the gate decision with
/// the active windows and bindings behind it.
pub async fn check(pool: &PgPool, external_id: &str, at: Moment) -> AppResult<ScheduleCheck> {
    let device = AuthenticatedDevice::authenticate(pool, external_id, None, at).await?;
    let schedule = snapshot::load_schedule(pool, device.device()).await?;
    let plan = schedule.plan(at.local);

    Ok(ScheduleCheck {
        device_id: device.profile().id,
        device_name: device.profile().name.clone(),
        should_display: plan.powered_on,
        current_time: at.local,
        operating_windows: schedule.active_windows().cloned().collect(),
        active_bindings: schedule.active_bindings().cloned().collect(),
        resolved_playlists: plan.playlists,
    })
}
