//! Day-of-week and time-of-day window matching.
//!
//! Weekdays are stored as small integers, Monday = 0 through Sunday = 6. An
//! empty weekday set means "every day". Time ranges are inclusive at both ends
//! and never wrap past midnight; overnight coverage needs two windows.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Serialize, Serializer};

use crate::error::CoreError;

/// Number of days in a week; valid weekday indices are `0..DAYS_PER_WEEK`.
pub const DAYS_PER_WEEK: i16 = 7;

// ---------------------------------------------------------------------------
// WeekdaySet
// ---------------------------------------------------------------------------

/// A set of weekdays stored as a bitmask. The empty set matches every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// The unrestricted set (matches all seven days).
    pub const EVERY_DAY: WeekdaySet = WeekdaySet(0);

    /// Build a set from database weekday indices (0 = Monday .. 6 = Sunday).
    pub fn from_indices(days: &[i16]) -> Result<Self, CoreError> {
        let mut mask = 0u8;
        for &day in days {
            if !(0..DAYS_PER_WEEK).contains(&day) {
                return Err(CoreError::Validation(format!(
                    "Invalid weekday index {day}: expected 0 (Monday) to 6 (Sunday)"
                )));
            }
            mask |= 1 << day;
        }
        Ok(Self(mask))
    }

    /// Build a set from chrono weekdays.
    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        Self(
            days.into_iter()
                .fold(0u8, |mask, day| mask | 1 << day.num_days_from_monday()),
        )
    }

    /// `true` when no days were configured, i.e. every day is effective.
    pub fn is_unrestricted(&self) -> bool {
        self.0 == 0
    }

    /// Whether `day` is one of the effective days of this set.
    pub fn contains(&self, day: Weekday) -> bool {
        self.is_unrestricted() || self.0 & (1 << day.num_days_from_monday()) != 0
    }

    /// The configured weekday indices in ascending order (empty when unrestricted).
    pub fn indices(&self) -> Vec<i16> {
        (0..DAYS_PER_WEEK)
            .filter(|day| self.0 & (1 << day) != 0)
            .collect()
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.indices().serialize(serializer)
    }
}

// ---------------------------------------------------------------------------
// TimeRange
// ---------------------------------------------------------------------------

/// An inclusive time-of-day range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::Validation(format!(
                "Time range start ({start}) must be before end ({end})"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Both bounds are inclusive.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

// ---------------------------------------------------------------------------
// TimeWindow
// ---------------------------------------------------------------------------

/// A weekday set combined with a time-of-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub days: WeekdaySet,
    pub range: TimeRange,
}

impl TimeWindow {
    pub fn new(days: WeekdaySet, range: TimeRange) -> Self {
        Self { days, range }
    }

    /// True iff the weekday of `at` is effective and its time of day lies
    /// within the range.
    pub fn matches(&self, at: NaiveDateTime) -> bool {
        self.days.contains(at.weekday()) && self.range.contains(at.time())
    }
}
