//! Repository for the append-only `qr_code_clicks` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::tracking::{CreateQrCodeClick, QrCodeClick};

const COLUMNS: &str =
    "id, media_item_id, tracking_code, client_ip, user_agent, referer, clicked_at";

pub struct QrClickRepo;

impl QrClickRepo {
    pub async fn create(pool: &PgPool, input: &CreateQrCodeClick) -> Result<QrCodeClick, sqlx::Error> {
        let query = format!(
            "INSERT INTO qr_code_clicks (media_item_id, tracking_code, client_ip, user_agent, referer)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QrCodeClick>(&query)
            .bind(input.media_item_id)
            .bind(&input.tracking_code)
            .bind(&input.client_ip)
            .bind(&input.user_agent)
            .bind(&input.referer)
            .fetch_one(pool)
            .await
    }

    pub async fn count_for_media(pool: &PgPool, media_item_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM qr_code_clicks WHERE media_item_id = $1")
                .bind(media_item_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
