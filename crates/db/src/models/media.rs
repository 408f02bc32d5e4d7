//! Media item model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::error::CoreError;
use vitrine_core::media::{MediaItem, MediaStatus, QrTarget};
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItemRow {
    pub id: DbId,
    pub title: String,
    pub status_id: i16,
    pub publish_at: Option<Timestamp>,
    pub expire_at: Option<Timestamp>,
    pub active: bool,
    pub file_path: Option<String>,
    pub duration_secs: i32,
    pub qr_destination_url: Option<String>,
    pub qr_tracking_code: String,
    pub qr_caption: Option<String>,
    pub overlay_caption: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MediaItemRow {
    pub fn to_domain(&self) -> Result<MediaItem, CoreError> {
        Ok(MediaItem {
            id: self.id,
            title: self.title.clone(),
            status: MediaStatus::from_id(self.status_id).map_err(CoreError::Internal)?,
            publish_at: self.publish_at,
            expire_at: self.expire_at,
            active: self.active,
            file_path: self.file_path.clone(),
            duration_secs: self.duration_secs,
            qr: qr_target(
                self.qr_destination_url.as_deref(),
                &self.qr_tracking_code,
                self.qr_caption.as_deref(),
            ),
            overlay_caption: self.overlay_caption.clone(),
        })
    }
}

/// A QR target exists only when a non-blank destination is configured.
pub(crate) fn qr_target(
    destination_url: Option<&str>,
    tracking_code: &str,
    caption: Option<&str>,
) -> Option<QrTarget> {
    let destination_url = destination_url.map(str::trim).filter(|u| !u.is_empty())?;
    Some(QrTarget {
        destination_url: destination_url.to_string(),
        tracking_code: tracking_code.to_string(),
        caption: caption.map(str::to_string),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMediaItem {
    pub title: String,
    /// Defaults to pending.
    pub status_id: Option<i16>,
    pub publish_at: Option<Timestamp>,
    pub expire_at: Option<Timestamp>,
    pub active: Option<bool>,
    pub file_path: Option<String>,
    pub duration_secs: i32,
    pub qr_destination_url: Option<String>,
    pub qr_caption: Option<String>,
    pub overlay_caption: Option<String>,
}
