//! Provider request quota model.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use vitrine_core::quota::DailyQuota;
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiQuota {
    pub id: DbId,
    pub provider: String,
    pub request_count: i32,
    pub daily_limit: i32,
    pub last_reset_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ApiQuota {
    pub fn to_domain(&self) -> DailyQuota {
        DailyQuota {
            provider: self.provider.clone(),
            request_count: self.request_count,
            daily_limit: self.daily_limit,
            last_reset_date: self.last_reset_date,
        }
    }
}
