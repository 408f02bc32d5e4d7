//! Repository for the `media_items` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::media::{CreateMediaItem, MediaItemRow};

const COLUMNS: &str = "id, title, status_id, publish_at, expire_at, active, file_path, \
    duration_secs, qr_destination_url, qr_tracking_code, qr_caption, overlay_caption, \
    created_at, updated_at";

pub struct MediaItemRepo;

impl MediaItemRepo {
    /// Insert a media item. The tracking code is generated by the database.
    pub async fn create(pool: &PgPool, input: &CreateMediaItem) -> Result<MediaItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_items
                (title, status_id, publish_at, expire_at, active, file_path, duration_secs,
                 qr_destination_url, qr_caption, overlay_caption)
             VALUES ($1, COALESCE($2, 1), $3, $4, COALESCE($5, TRUE), $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaItemRow>(&query)
            .bind(&input.title)
            .bind(input.status_id)
            .bind(input.publish_at)
            .bind(input.expire_at)
            .bind(input.active)
            .bind(&input.file_path)
            .bind(input.duration_secs)
            .bind(&input.qr_destination_url)
            .bind(&input.qr_caption)
            .bind(&input.overlay_caption)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MediaItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE id = $1");
        sqlx::query_as::<_, MediaItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_tracking_code(
        pool: &PgPool,
        tracking_code: &str,
    ) -> Result<Option<MediaItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_items WHERE qr_tracking_code = $1");
        sqlx::query_as::<_, MediaItemRow>(&query)
            .bind(tracking_code)
            .fetch_optional(pool)
            .await
    }
}
