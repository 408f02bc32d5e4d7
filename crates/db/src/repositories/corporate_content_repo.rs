//! Repository for the `corporate_contents` table.

use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::corporate::{CorporateContentRow, CreateCorporateContent};

const COLUMNS: &str =
    "id, title, kind, duration_secs, filter_config, active, created_at, updated_at";

pub struct CorporateContentRepo;

impl CorporateContentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCorporateContent,
    ) -> Result<CorporateContentRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO corporate_contents (title, kind, duration_secs, filter_config, active)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb), COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CorporateContentRow>(&query)
            .bind(&input.title)
            .bind(input.kind.as_str())
            .bind(input.duration_secs)
            .bind(&input.filter_config)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CorporateContentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM corporate_contents WHERE id = $1");
        sqlx::query_as::<_, CorporateContentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
