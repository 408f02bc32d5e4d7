//! Exhibition log models (append-only).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExhibitionLog {
    pub id: DbId,
    pub device_id: DbId,
    pub media_item_id: DbId,
    pub playlist_id: DbId,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub fully_played: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateExhibitionLog {
    pub device_id: DbId,
    pub media_item_id: DbId,
    pub playlist_id: DbId,
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub fully_played: bool,
}

/// Totals over a device's exhibition history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExhibitionTotals {
    pub total: i64,
    pub fully_played: i64,
}

/// Per-media exhibition count for the top-N report.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaExhibitionCount {
    pub media_item_id: DbId,
    pub title: String,
    pub exhibitions: i64,
    pub fully_played: i64,
}
