use chrono::{FixedOffset, NaiveDateTime};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A single instant seen two ways: as an absolute UTC timestamp (publish and
/// expiry checks, heartbeats) and as venue-local wall-clock time (weekday and
/// time-of-day matching).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub utc: Timestamp,
    pub local: NaiveDateTime,
}

impl Moment {
    /// Project `utc` into the venue's fixed UTC offset.
    pub fn at_offset(utc: Timestamp, offset: FixedOffset) -> Self {
        Self {
            utc,
            local: utc.with_timezone(&offset).naive_local(),
        }
    }

    /// A moment whose local wall-clock time equals its UTC time.
    pub fn utc(utc: Timestamp) -> Self {
        Self {
            utc,
            local: utc.naive_utc(),
        }
    }
}
