//! Schedule binding model.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::error::CoreError;
use vitrine_core::schedule::ScheduleBinding;
use vitrine_core::time_window::{TimeRange, WeekdaySet};
use vitrine_core::types::{DbId, Timestamp};

/// A binding joined with the bound playlist's name and active flag.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScheduleBindingRow {
    pub id: DbId,
    pub device_id: DbId,
    pub playlist_id: DbId,
    pub name: String,
    pub days: Vec<i16>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub priority: i32,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub playlist_name: String,
    pub playlist_active: bool,
}

impl ScheduleBindingRow {
    pub fn to_domain(&self) -> Result<ScheduleBinding, CoreError> {
        let hours = match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeRange::new(start, end)?),
            (None, None) => None,
            _ => {
                return Err(CoreError::InconsistentState(format!(
                    "schedule binding {} has only one time bound",
                    self.id
                )))
            }
        };
        Ok(ScheduleBinding {
            id: self.id,
            name: self.name.clone(),
            playlist_id: self.playlist_id,
            playlist_name: self.playlist_name.clone(),
            playlist_active: self.playlist_active,
            days: WeekdaySet::from_indices(&self.days)?,
            hours,
            priority: self.priority,
            active: self.active,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScheduleBinding {
    pub playlist_id: DbId,
    pub name: Option<String>,
    #[serde(default)]
    pub days: Vec<i16>,
    /// Both `None` for a full-time binding.
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub priority: Option<i32>,
    pub active: Option<bool>,
}
