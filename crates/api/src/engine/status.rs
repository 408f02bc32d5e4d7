//! Connection status of devices for the monitoring surface.

use serde::Serialize;
use sqlx::PgPool;
use vitrine_core::connection::{status_at, ConnectionStatus};
use vitrine_core::types::{DbId, Moment, Timestamp};
use vitrine_db::models::device::Device;
use vitrine_db::repositories::OperatingWindowRepo;

use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct DeviceStatusView {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub venue_name: Option<String>,
    pub status: ConnectionStatus,
    pub last_heartbeat_at: Option<Timestamp>,
    pub client_version: Option<String>,
    pub active: bool,
}

/// Derive `device`'s status at `at` from its heartbeat and operating windows.
pub async fn device_status(pool: &PgPool, device: Device, at: Moment) -> AppResult<DeviceStatusView> {
    let windows: Vec<_> = OperatingWindowRepo::list_by_device(pool, device.id)
        .await?
        .iter()
        .filter_map(|row| row.to_domain().ok())
        .collect();

    Ok(DeviceStatusView {
        status: status_at(device.last_heartbeat_at, &windows, at),
        id: device.id,
        external_id: device.external_id,
        name: device.name,
        venue_name: device.venue_name,
        last_heartbeat_at: device.last_heartbeat_at,
        client_version: device.client_version,
        active: device.active,
    })
}
