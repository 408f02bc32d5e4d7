//! Repository for the `schedule_bindings` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::schedule::{CreateScheduleBinding, ScheduleBindingRow};

/// Select list over `schedule_bindings b` joined with `playlists p`.
const COLUMNS: &str = "b.id, b.device_id, b.playlist_id, b.name, b.days, b.start_time, \
    b.end_time, b.priority, b.active, b.created_at, b.updated_at, \
    p.name AS playlist_name, p.active AS playlist_active";

pub struct ScheduleBindingRepo;

impl ScheduleBindingRepo {
    pub async fn create(
        pool: &PgPool,
        device_id: DbId,
        input: &CreateScheduleBinding,
    ) -> Result<ScheduleBindingRow, sqlx::Error> {
        let query = format!(
            "WITH b AS (
                INSERT INTO schedule_bindings
                    (device_id, playlist_id, name, days, start_time, end_time, priority, active)
                VALUES ($1, $2, COALESCE($3, ''), $4, $5, $6, COALESCE($7, 0), COALESCE($8, TRUE))
                RETURNING *
             )
             SELECT {COLUMNS} FROM b JOIN playlists p ON p.id = b.playlist_id"
        );
        sqlx::query_as::<_, ScheduleBindingRow>(&query)
            .bind(device_id)
            .bind(input.playlist_id)
            .bind(&input.name)
            .bind(&input.days)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.priority)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// All bindings of a device in creation order, with playlist name and
    /// active flag joined in.
    pub async fn list_by_device(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<Vec<ScheduleBindingRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM schedule_bindings b
             JOIN playlists p ON p.id = b.playlist_id
             WHERE b.device_id = $1
             ORDER BY b.created_at, b.id"
        );
        sqlx::query_as::<_, ScheduleBindingRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }
}
