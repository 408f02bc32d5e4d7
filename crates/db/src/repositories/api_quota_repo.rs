//! Repository for the `api_quotas` table.
//!
//! The stale-counter reset and the increment are both conditional updates,
//! so concurrent resolvers cannot push a provider past its daily limit.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::quota::ApiQuota;

const COLUMNS: &str =
    "id, provider, request_count, daily_limit, last_reset_date, created_at, updated_at";

pub struct ApiQuotaRepo;

impl ApiQuotaRepo {
    /// Fetch the provider's counter, creating it with `today` as the reset
    /// date if it does not exist yet. The stored limit always takes the
    /// configured `daily_limit`.
    pub async fn find_or_create(
        pool: &PgPool,
        provider: &str,
        daily_limit: i32,
        today: NaiveDate,
    ) -> Result<ApiQuota, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_quotas (provider, daily_limit, last_reset_date)
             VALUES ($1, $2, $3)
             ON CONFLICT (provider) DO UPDATE SET daily_limit = EXCLUDED.daily_limit
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiQuota>(&query)
            .bind(provider)
            .bind(daily_limit)
            .bind(today)
            .fetch_one(pool)
            .await
    }

    /// Zero the counter if it was last reset before `today`. Returns `true`
    /// if this call performed the reset.
    pub async fn reset_if_stale(
        pool: &PgPool,
        provider: &str,
        today: NaiveDate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE api_quotas SET request_count = 0, last_reset_date = $2
             WHERE provider = $1 AND last_reset_date < $2",
        )
        .bind(provider)
        .bind(today)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count one request if the provider is still under its limit.
    ///
    /// Returns the updated row, or `None` when the limit is already reached.
    pub async fn record_request(
        pool: &PgPool,
        provider: &str,
    ) -> Result<Option<ApiQuota>, sqlx::Error> {
        let query = format!(
            "UPDATE api_quotas SET request_count = request_count + 1
             WHERE provider = $1 AND request_count < daily_limit
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiQuota>(&query)
            .bind(provider)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_provider(
        pool: &PgPool,
        provider: &str,
    ) -> Result<Option<ApiQuota>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_quotas WHERE provider = $1");
        sqlx::query_as::<_, ApiQuota>(&query)
            .bind(provider)
            .fetch_optional(pool)
            .await
    }
}
