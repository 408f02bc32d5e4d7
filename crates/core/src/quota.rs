//! Daily request budget for an external data provider.
//!
//! The counter is an explicit value with a last-reset date. Callers load it,
//! call [`DailyQuota::reset_if_stale`] with today's date, and persist the
//! result; there is no process-wide counter.

use chrono::NaiveDate;
use serde::Serialize;

pub const PROVIDER_WEATHER: &str = "weather";
pub const PROVIDER_QUOTES: &str = "quotes";
pub const PROVIDER_NEWS: &str = "news";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyQuota {
    pub provider: String,
    pub request_count: i32,
    pub daily_limit: i32,
    pub last_reset_date: NaiveDate,
}

impl DailyQuota {
    /// Zero the counter if it was last reset before `today`. Returns whether
    /// a reset happened.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.last_reset_date < today {
            self.request_count = 0;
            self.last_reset_date = today;
            true
        } else {
            false
        }
    }

    pub fn can_request(&self) -> bool {
        self.request_count < self.daily_limit
    }

    pub fn remaining(&self) -> i32 {
        (self.daily_limit - self.request_count).max(0)
    }
}
