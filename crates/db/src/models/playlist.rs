//! Playlist and playlist item models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::content::{ItemSource, PlaylistItem};
use vitrine_core::error::CoreError;
use vitrine_core::media::{MediaItem, MediaStatus};
use vitrine_core::types::{DbId, Timestamp};

use super::corporate::corporate_content;
use super::media::qr_target;

// ---------------------------------------------------------------------------
// Playlist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    pub id: DbId,
    pub name: String,
    pub active: bool,
    /// Cached sum of `duration * repetitions` over active items.
    pub total_duration_secs: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    pub active: Option<bool>,
}

// ---------------------------------------------------------------------------
// Playlist items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistItemRow {
    pub id: DbId,
    pub playlist_id: DbId,
    pub media_item_id: Option<DbId>,
    pub corporate_content_id: Option<DbId>,
    pub position: i32,
    pub repetitions: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Exactly one of `media_item_id` / `corporate_content_id` must be set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistItem {
    pub media_item_id: Option<DbId>,
    pub corporate_content_id: Option<DbId>,
    pub position: i32,
    /// Defaults to 1.
    pub repetitions: Option<i32>,
    pub active: Option<bool>,
}

/// A playlist item joined with whichever source it references.
///
/// Media columns are prefixed `m_`, corporate columns `c_`; the columns of
/// the absent source are all NULL.
#[derive(Debug, Clone, FromRow)]
pub struct PlaylistItemDetail {
    pub id: DbId,
    pub playlist_id: DbId,
    pub position: i32,
    pub repetitions: i32,
    pub active: bool,
    pub media_item_id: Option<DbId>,
    pub corporate_content_id: Option<DbId>,
    pub m_title: Option<String>,
    pub m_status_id: Option<i16>,
    pub m_publish_at: Option<Timestamp>,
    pub m_expire_at: Option<Timestamp>,
    pub m_active: Option<bool>,
    pub m_file_path: Option<String>,
    pub m_duration_secs: Option<i32>,
    pub m_qr_destination_url: Option<String>,
    pub m_qr_tracking_code: Option<String>,
    pub m_qr_caption: Option<String>,
    pub m_overlay_caption: Option<String>,
    pub c_title: Option<String>,
    pub c_kind: Option<String>,
    pub c_duration_secs: Option<i32>,
    pub c_filter_config: Option<serde_json::Value>,
    pub c_active: Option<bool>,
}

impl PlaylistItemDetail {
    pub fn to_domain(&self) -> Result<PlaylistItem, CoreError> {
        let source = match (self.media_item_id, self.corporate_content_id) {
            (Some(media_id), None) => ItemSource::Media(self.media(media_id)?),
            (None, Some(content_id)) => ItemSource::Corporate(corporate_content(
                content_id,
                self.c_title.as_deref().unwrap_or_default(),
                self.c_kind.as_deref().unwrap_or_default(),
                self.c_duration_secs.unwrap_or_default(),
                self.c_filter_config.as_ref().unwrap_or(&serde_json::Value::Null),
                self.c_active.unwrap_or(false),
            )?),
            _ => {
                return Err(CoreError::InconsistentState(format!(
                    "playlist item {} must reference exactly one source",
                    self.id
                )))
            }
        };
        Ok(PlaylistItem {
            id: self.id,
            position: self.position,
            repetitions: self.repetitions,
            active: self.active,
            source,
        })
    }

    fn media(&self, media_id: DbId) -> Result<MediaItem, CoreError> {
        let status_id = self.m_status_id.ok_or_else(|| {
            CoreError::Internal(format!("media item {media_id} missing status"))
        })?;
        Ok(MediaItem {
            id: media_id,
            title: self.m_title.clone().unwrap_or_default(),
            status: MediaStatus::from_id(status_id).map_err(CoreError::Internal)?,
            publish_at: self.m_publish_at,
            expire_at: self.m_expire_at,
            active: self.m_active.unwrap_or(false),
            file_path: self.m_file_path.clone(),
            duration_secs: self.m_duration_secs.unwrap_or_default(),
            qr: qr_target(
                self.m_qr_destination_url.as_deref(),
                self.m_qr_tracking_code.as_deref().unwrap_or_default(),
                self.m_qr_caption.as_deref(),
            ),
            overlay_caption: self.m_overlay_caption.clone(),
        })
    }
}
