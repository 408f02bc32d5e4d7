//! Media item lifecycle and visibility rules.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status IDs
// ---------------------------------------------------------------------------

/// Media status IDs matching the `media_statuses` seed data (1-based SMALLSERIAL).
pub const MEDIA_STATUS_PENDING: i16 = 1;
pub const MEDIA_STATUS_APPROVED: i16 = 2;
pub const MEDIA_STATUS_REJECTED: i16 = 3;
pub const MEDIA_STATUS_SCHEDULED: i16 = 4;

/// Approval lifecycle of a media item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaStatus {
    Pending,
    Approved,
    Rejected,
    Scheduled,
}

impl MediaStatus {
    /// Convert from a `media_statuses.id` value.
    pub fn from_id(id: i16) -> Result<Self, String> {
        match id {
            MEDIA_STATUS_PENDING => Ok(Self::Pending),
            MEDIA_STATUS_APPROVED => Ok(Self::Approved),
            MEDIA_STATUS_REJECTED => Ok(Self::Rejected),
            MEDIA_STATUS_SCHEDULED => Ok(Self::Scheduled),
            _ => Err(format!("Unknown media status id {id}")),
        }
    }

    pub fn id(&self) -> i16 {
        match self {
            Self::Pending => MEDIA_STATUS_PENDING,
            Self::Approved => MEDIA_STATUS_APPROVED,
            Self::Rejected => MEDIA_STATUS_REJECTED,
            Self::Scheduled => MEDIA_STATUS_SCHEDULED,
        }
    }
}

// ---------------------------------------------------------------------------
// MediaItem
// ---------------------------------------------------------------------------

/// QR code call-to-action attached to a media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrTarget {
    pub destination_url: String,
    pub tracking_code: String,
    pub caption: Option<String>,
}

/// A literal media file as the assembler sees it.
#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub title: String,
    pub status: MediaStatus,
    pub publish_at: Option<Timestamp>,
    pub expire_at: Option<Timestamp>,
    pub active: bool,
    /// Storage path relative to the media root; `None` when the file is missing.
    pub file_path: Option<String>,
    pub duration_secs: i32,
    /// Present only when a destination URL is configured.
    pub qr: Option<QrTarget>,
    pub overlay_caption: Option<String>,
}

impl MediaItem {
    /// Approval-based visibility at `now`.
    ///
    /// Approved items are always visible; scheduled items only inside their
    /// `[publish_at, expire_at]` window (a missing `publish_at` hides them, a
    /// missing `expire_at` never expires). Pending and rejected items are
    /// never visible. The active flag is checked separately.
    pub fn is_visible(&self, now: Timestamp) -> bool {
        match self.status {
            MediaStatus::Approved => true,
            MediaStatus::Scheduled => {
                let published = self.publish_at.is_some_and(|at| at <= now);
                let not_expired = self.expire_at.is_none_or(|at| at >= now);
                published && not_expired
            }
            MediaStatus::Pending | MediaStatus::Rejected => false,
        }
    }

    /// The stored file path, if the file is present.
    pub fn stored_file(&self) -> Option<&str> {
        self.file_path.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Whether the item should be emitted by the assembler at `now`.
    pub fn is_playable(&self, now: Timestamp) -> bool {
        self.active && self.stored_file().is_some() && self.is_visible(now)
    }
}
