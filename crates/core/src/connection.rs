//! Connectivity diagnostic for the monitoring surface.

use chrono::Duration;
use serde::Serialize;

use crate::operating_hours::{self, OperatingWindow};
use crate::types::{Moment, Timestamp};

/// A heartbeat older than this marks the device disconnected.
pub const HEARTBEAT_TIMEOUT_MINS: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    OutsideHours,
    Transmitting,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::OutsideHours => "outside_hours",
            Self::Transmitting => "transmitting",
        }
    }
}

/// Derive the status from the last heartbeat and the gate decision.
pub fn derive_status(
    last_heartbeat: Option<Timestamp>,
    now: Timestamp,
    powered_on: bool,
) -> ConnectionStatus {
    match last_heartbeat {
        None => ConnectionStatus::Disconnected,
        Some(at) if now - at > Duration::minutes(HEARTBEAT_TIMEOUT_MINS) => {
            ConnectionStatus::Disconnected
        }
        Some(_) if powered_on => ConnectionStatus::Transmitting,
        Some(_) => ConnectionStatus::OutsideHours,
    }
}

/// Same as [`derive_status`], evaluating the gate for `at`.
pub fn status_at(
    last_heartbeat: Option<Timestamp>,
    windows: &[OperatingWindow],
    at: Moment,
) -> ConnectionStatus {
    derive_status(
        last_heartbeat,
        at.utc,
        operating_hours::is_powered_on(windows, at.local),
    )
}
