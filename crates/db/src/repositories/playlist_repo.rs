//! Repository for the `playlists` and `playlist_items` tables.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::playlist::{
    CreatePlaylist, CreatePlaylistItem, Playlist, PlaylistItemDetail, PlaylistItemRow,
};

const COLUMNS: &str = "id, name, active, total_duration_secs, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, playlist_id, media_item_id, corporate_content_id, position, \
    repetitions, active, created_at, updated_at";

/// Select list for [`PlaylistItemDetail`] over `playlist_items i` joined with
/// `media_items m` and `corporate_contents c`.
const DETAIL_COLUMNS: &str = "i.id, i.playlist_id, i.position, i.repetitions, i.active, \
    i.media_item_id, i.corporate_content_id, \
    m.title AS m_title, m.status_id AS m_status_id, m.publish_at AS m_publish_at, \
    m.expire_at AS m_expire_at, m.active AS m_active, m.file_path AS m_file_path, \
    m.duration_secs AS m_duration_secs, m.qr_destination_url AS m_qr_destination_url, \
    m.qr_tracking_code AS m_qr_tracking_code, m.qr_caption AS m_qr_caption, \
    m.overlay_caption AS m_overlay_caption, \
    c.title AS c_title, c.kind AS c_kind, c.duration_secs AS c_duration_secs, \
    c.filter_config AS c_filter_config, c.active AS c_active";

pub struct PlaylistRepo;

impl PlaylistRepo {
    pub async fn create(pool: &PgPool, input: &CreatePlaylist) -> Result<Playlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlists (name, active)
             VALUES ($1, COALESCE($2, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(&input.name)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playlists WHERE id = $1");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append an item and refresh the playlist's cached total duration.
    pub async fn add_item(
        pool: &PgPool,
        playlist_id: DbId,
        input: &CreatePlaylistItem,
    ) -> Result<PlaylistItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlist_items
                (playlist_id, media_item_id, corporate_content_id, position, repetitions, active)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1), COALESCE($6, TRUE))
             RETURNING {ITEM_COLUMNS}"
        );
        let item = sqlx::query_as::<_, PlaylistItemRow>(&query)
            .bind(playlist_id)
            .bind(input.media_item_id)
            .bind(input.corporate_content_id)
            .bind(input.position)
            .bind(input.repetitions)
            .bind(input.active)
            .fetch_one(pool)
            .await?;

        Self::recompute_total_duration(pool, playlist_id).await?;
        Ok(item)
    }

    /// Recompute the cached total: `duration * repetitions` summed over
    /// active items. Returns the new total, or `None` for an unknown playlist.
    pub async fn recompute_total_duration(
        pool: &PgPool,
        playlist_id: DbId,
    ) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> = sqlx::query_as(
            "UPDATE playlists p SET total_duration_secs = (
                SELECT COALESCE(SUM(
                    COALESCE(m.duration_secs, c.duration_secs, 0)::BIGINT * i.repetitions
                ), 0)::BIGINT
                FROM playlist_items i
                LEFT JOIN media_items m ON m.id = i.media_item_id
                LEFT JOIN corporate_contents c ON c.id = i.corporate_content_id
                WHERE i.playlist_id = p.id AND i.active
             )
             WHERE p.id = $1
             RETURNING total_duration_secs",
        )
        .bind(playlist_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(total,)| total))
    }

    /// Items of the given playlists with their sources joined, ordered by
    /// playlist, position and id.
    pub async fn list_item_details(
        pool: &PgPool,
        playlist_ids: &[DbId],
    ) -> Result<Vec<PlaylistItemDetail>, sqlx::Error> {
        if playlist_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {DETAIL_COLUMNS}
             FROM playlist_items i
             LEFT JOIN media_items m ON m.id = i.media_item_id
             LEFT JOIN corporate_contents c ON c.id = i.corporate_content_id
             WHERE i.playlist_id = ANY($1)
             ORDER BY i.playlist_id, i.position, i.id"
        );
        sqlx::query_as::<_, PlaylistItemDetail>(&query)
            .bind(playlist_ids)
            .fetch_all(pool)
            .await
    }

    /// Which of `playlist_ids` contain `media_item_id` as an active item.
    pub async fn playlists_containing_media(
        pool: &PgPool,
        media_item_id: DbId,
        playlist_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if playlist_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT playlist_id FROM playlist_items
             WHERE media_item_id = $1 AND playlist_id = ANY($2) AND active",
        )
        .bind(media_item_id)
        .bind(playlist_ids)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
