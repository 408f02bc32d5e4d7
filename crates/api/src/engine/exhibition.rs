//! Record playback-completion reports.

use sqlx::PgPool;
use vitrine_core::error::CoreError;
use vitrine_core::exhibition::{choose_log_playlist, playback_report};
use vitrine_core::types::{DbId, Moment};
use vitrine_db::models::exhibition::{CreateExhibitionLog, ExhibitionLog};
use vitrine_db::repositories::{DeviceRepo, ExhibitionLogRepo, MediaItemRepo, PlaylistRepo};

use super::snapshot;
use crate::error::AppResult;

/// A device's report that it finished showing a media item.
#[derive(Debug, Clone, Copy)]
pub struct ExhibitionReport {
    pub device_id: DbId,
    pub media_item_id: DbId,
    pub elapsed_secs: i64,
}

/// Append an exhibition entry ending at `at`.
///
/// The entry is logged against the first playlist the device currently
/// resolves to that contains the media item, else the first resolved
/// playlist. A device resolving to nothing is rejected with
/// `InconsistentState`. The operating-hours gate is not consulted.
pub async fn record(pool: &PgPool, report: ExhibitionReport, at: Moment) -> AppResult<ExhibitionLog> {
    let device = DeviceRepo::find_by_id(pool, report.device_id)
        .await?
        .filter(|d| d.active)
        .ok_or(CoreError::NotFound {
            entity: "Device",
            id: report.device_id,
        })?;

    let media = MediaItemRepo::find_by_id(pool, report.media_item_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MediaItem",
            id: report.media_item_id,
        })?;

    let playback = playback_report(at.utc, report.elapsed_secs, media.duration_secs)?;

    let schedule = snapshot::load_schedule(pool, &device).await?;
    let resolved = schedule.resolve(at.local);
    let resolved_ids: Vec<DbId> = resolved.iter().map(|p| p.playlist_id).collect();
    let containing = PlaylistRepo::playlists_containing_media(pool, media.id, &resolved_ids).await?;
    let playlist_id = choose_log_playlist(&resolved, &containing)?;

    let log = ExhibitionLogRepo::create(
        pool,
        &CreateExhibitionLog {
            device_id: device.id,
            media_item_id: media.id,
            playlist_id,
            started_at: playback.started_at,
            ended_at: playback.ended_at,
            fully_played: playback.fully_played,
        },
    )
    .await?;

    tracing::info!(
        device_id = device.id,
        media_item_id = media.id,
        playlist_id,
        fully_played = log.fully_played,
        "Exhibition recorded"
    );

    Ok(log)
}
