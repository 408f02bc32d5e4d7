//! Repository for the `devices` table.
//!
//! Reads join the venue and the legacy default playlist so a single query
//! yields everything the poll needs about the device itself.

use sqlx::PgPool;
use vitrine_core::types::{DbId, Timestamp};

use crate::models::device::{CreateDevice, Device};

/// Select list over `devices d` joined with `venues v` and `playlists p`.
const COLUMNS: &str = "d.id, d.external_id, d.name, d.venue_id, d.default_playlist_id, \
    d.last_heartbeat_at, d.client_version, d.active, d.created_at, d.updated_at, \
    v.name AS venue_name, v.latitude AS venue_latitude, v.longitude AS venue_longitude, \
    p.name AS default_playlist_name, p.active AS default_playlist_active";

const JOINS: &str = "LEFT JOIN venues v ON v.id = d.venue_id \
    LEFT JOIN playlists p ON p.id = d.default_playlist_id";

/// Provides lookups and the heartbeat write for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Insert a new device, returning the joined row.
    pub async fn create(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "WITH d AS (
                INSERT INTO devices (external_id, name, venue_id, default_playlist_id, active)
                VALUES ($1, $2, $3, $4, COALESCE($5, TRUE))
                RETURNING *
             )
             SELECT {COLUMNS} FROM d {JOINS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.external_id)
            .bind(&input.name)
            .bind(input.venue_id)
            .bind(input.default_playlist_id)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices d {JOINS} WHERE d.id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active device by the identifier it polls with.
    pub async fn find_active_by_external_id(
        pool: &PgPool,
        external_id: &str,
    ) -> Result<Option<Device>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM devices d {JOINS} WHERE d.external_id = $1 AND d.active"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// List all devices ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices d {JOINS} ORDER BY d.name, d.id");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// Record a heartbeat, and the client version when one is given.
    ///
    /// Last writer wins; returns the stored heartbeat, or `None` if the
    /// device no longer exists.
    pub async fn touch_heartbeat(
        pool: &PgPool,
        id: DbId,
        at: Timestamp,
        client_version: Option<&str>,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let row: Option<(Option<Timestamp>,)> = sqlx::query_as(
            "UPDATE devices SET
                last_heartbeat_at = $2,
                client_version = COALESCE($3, client_version)
             WHERE id = $1
             RETURNING last_heartbeat_at",
        )
        .bind(id)
        .bind(at)
        .bind(client_version)
        .fetch_optional(pool)
        .await?;
        Ok(row.and_then(|(at,)| at))
    }
}
