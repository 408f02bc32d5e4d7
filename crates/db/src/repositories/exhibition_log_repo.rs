//! Repository for the append-only `exhibition_logs` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::exhibition::{
    CreateExhibitionLog, ExhibitionLog, ExhibitionTotals, MediaExhibitionCount,
};

const COLUMNS: &str =
    "id, device_id, media_item_id, playlist_id, started_at, ended_at, fully_played, created_at";

pub struct ExhibitionLogRepo;

impl ExhibitionLogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateExhibitionLog,
    ) -> Result<ExhibitionLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO exhibition_logs
                (device_id, media_item_id, playlist_id, started_at, ended_at, fully_played)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExhibitionLog>(&query)
            .bind(input.device_id)
            .bind(input.media_item_id)
            .bind(input.playlist_id)
            .bind(input.started_at)
            .bind(input.ended_at)
            .bind(input.fully_played)
            .fetch_one(pool)
            .await
    }

    /// Most recent entries for a device.
    pub async fn list_by_device(
        pool: &PgPool,
        device_id: DbId,
        limit: i64,
    ) -> Result<Vec<ExhibitionLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM exhibition_logs
             WHERE device_id = $1
             ORDER BY started_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, ExhibitionLog>(&query)
            .bind(device_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn totals_for_device(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<ExhibitionTotals, sqlx::Error> {
        sqlx::query_as::<_, ExhibitionTotals>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE fully_played) AS fully_played
             FROM exhibition_logs
             WHERE device_id = $1",
        )
        .bind(device_id)
        .fetch_one(pool)
        .await
    }

    /// Media items with the most exhibitions on a device.
    pub async fn top_media_for_device(
        pool: &PgPool,
        device_id: DbId,
        limit: i64,
    ) -> Result<Vec<MediaExhibitionCount>, sqlx::Error> {
        sqlx::query_as::<_, MediaExhibitionCount>(
            "SELECT e.media_item_id, m.title,
                    COUNT(*) AS exhibitions,
                    COUNT(*) FILTER (WHERE e.fully_played) AS fully_played
             FROM exhibition_logs e
             JOIN media_items m ON m.id = e.media_item_id
             WHERE e.device_id = $1
             GROUP BY e.media_item_id, m.title
             ORDER BY exhibitions DESC, e.media_item_id
             LIMIT $2",
        )
        .bind(device_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
