//! Repository for the `operating_windows` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::operating_window::{CreateOperatingWindow, OperatingWindowRow};

const COLUMNS: &str =
    "id, device_id, name, days, start_time, end_time, active, created_at, updated_at";

pub struct OperatingWindowRepo;

impl OperatingWindowRepo {
    pub async fn create(
        pool: &PgPool,
        device_id: DbId,
        input: &CreateOperatingWindow,
    ) -> Result<OperatingWindowRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO operating_windows (device_id, name, days, start_time, end_time, active)
             VALUES ($1, COALESCE($2, ''), $3, $4, $5, COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OperatingWindowRow>(&query)
            .bind(device_id)
            .bind(&input.name)
            .bind(&input.days)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// All windows of a device, active or not.
    pub async fn list_by_device(
        pool: &PgPool,
        device_id: DbId,
    ) -> Result<Vec<OperatingWindowRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM operating_windows WHERE device_id = $1 ORDER BY start_time, id"
        );
        sqlx::query_as::<_, OperatingWindowRow>(&query)
            .bind(device_id)
            .fetch_all(pool)
            .await
    }
}
