//! Operating-hours window model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::error::CoreError;
use vitrine_core::operating_hours::OperatingWindow;
use vitrine_core::time_window::{TimeRange, TimeWindow, WeekdaySet};
use vitrine_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OperatingWindowRow {
    pub id: DbId,
    pub device_id: DbId,
    pub name: String,
    pub days: Vec<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OperatingWindowRow {
    pub fn to_domain(&self) -> Result<OperatingWindow, CoreError> {
        let days = WeekdaySet::from_indices(&self.days)?;
        let range = TimeRange::new(self.start_time, self.end_time)?;
        Ok(OperatingWindow {
            id: self.id,
            name: self.name.clone(),
            window: TimeWindow::new(days, range),
            active: self.active,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOperatingWindow {
    pub name: Option<String>,
    /// Weekday indices, 0 = Monday. Empty means every day.
    #[serde(default)]
    pub days: Vec<i16>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub active: Option<bool>,
}
