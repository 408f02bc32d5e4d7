//! Load everything the scheduling logic needs for one device.
//!
//! Rows that fail to convert into domain types are skipped with a warning so
//! one malformed item cannot take a whole screen offline.

use std::collections::HashMap;

use sqlx::PgPool;
use vitrine_core::content::{PlaylistContent, PlaylistItem};
use vitrine_core::poll::DeviceSchedule;
use vitrine_core::schedule::ResolvedPlaylist;
use vitrine_core::types::DbId;
use vitrine_db::models::device::Device;
use vitrine_db::repositories::{OperatingWindowRepo, PlaylistRepo, ScheduleBindingRepo};

use crate::error::AppResult;

/// Operating windows, schedule bindings and the legacy fallback of `device`.
pub async fn load_schedule(pool: &PgPool, device: &Device) -> AppResult<DeviceSchedule> {
    let (window_rows, binding_rows) = tokio::try_join!(
        OperatingWindowRepo::list_by_device(pool, device.id),
        ScheduleBindingRepo::list_by_device(pool, device.id),
    )?;

    let windows = window_rows
        .iter()
        .filter_map(|row| match row.to_domain() {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::warn!(device_id = device.id, window_id = row.id, error = %e, "Skipping malformed operating window");
                None
            }
        })
        .collect();

    let bindings = binding_rows
        .iter()
        .filter_map(|row| match row.to_domain() {
            Ok(binding) => Some(binding),
            Err(e) => {
                tracing::warn!(device_id = device.id, binding_id = row.id, error = %e, "Skipping malformed schedule binding");
                None
            }
        })
        .collect();

    Ok(DeviceSchedule {
        windows,
        bindings,
        fallback: device.fallback_playlist(),
    })
}

/// Load the items of every resolved playlist, in resolver order.
///
/// A playlist resolved twice appears twice in the output.
pub async fn load_playlists(
    pool: &PgPool,
    resolved: &[ResolvedPlaylist],
) -> AppResult<Vec<PlaylistContent>> {
    let mut ids: Vec<DbId> = resolved.iter().map(|p| p.playlist_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let details = PlaylistRepo::list_item_details(pool, &ids).await?;

    let mut items: HashMap<DbId, Vec<PlaylistItem>> = HashMap::new();
    for detail in &details {
        match detail.to_domain() {
            Ok(item) => items.entry(detail.playlist_id).or_default().push(item),
            Err(e) => {
                tracing::warn!(
                    playlist_id = detail.playlist_id,
                    item_id = detail.id,
                    error = %e,
                    "Skipping malformed playlist item"
                );
            }
        }
    }

    Ok(resolved
        .iter()
        .map(|p| PlaylistContent {
            id: p.playlist_id,
            name: p.playlist_name.clone(),
            items: items.get(&p.playlist_id).cloned().unwrap_or_default(),
        })
        .collect())
}
