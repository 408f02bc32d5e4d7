//! QR code click tracking models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QrCodeClick {
    pub id: DbId,
    pub media_item_id: DbId,
    pub tracking_code: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub clicked_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateQrCodeClick {
    pub media_item_id: DbId,
    pub tracking_code: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}
