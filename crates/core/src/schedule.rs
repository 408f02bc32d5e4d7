//! Schedule resolution: which playlists are active for a device right now.
//!
//! Bindings fall into two groups. "Timed" bindings carry a time-of-day range
//! and play as an overlay; "full-time" bindings have no range and form the
//! continuous base layer. The two groups are ordered independently and then
//! concatenated, timed first. They are never merged into one sort, so a
//! high-priority full-time binding cannot jump ahead of a timed one.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::time_window::{TimeRange, WeekdaySet};
use crate::types::{DbId, Timestamp};

/// A playlist assignment to a device, with the bound playlist's active flag
/// already joined in.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleBinding {
    pub id: DbId,
    pub name: String,
    pub playlist_id: DbId,
    pub playlist_name: String,
    pub playlist_active: bool,
    pub days: WeekdaySet,
    /// `None` marks a full-time binding.
    pub hours: Option<TimeRange>,
    pub priority: i32,
    pub active: bool,
    pub created_at: Timestamp,
}

impl ScheduleBinding {
    pub fn is_full_time(&self) -> bool {
        self.hours.is_none()
    }
}

/// The device's legacy single-playlist assignment.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackPlaylist {
    pub playlist_id: DbId,
    pub playlist_name: String,
    pub active: bool,
}

/// Where a resolved playlist came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleLayer {
    Timed,
    FullTime,
    Fallback,
}

/// One entry of the resolver output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPlaylist {
    pub playlist_id: DbId,
    pub playlist_name: String,
    pub layer: ScheduleLayer,
    /// `None` for the fallback playlist.
    pub binding_id: Option<DbId>,
}

impl ResolvedPlaylist {
    fn from_binding(binding: &ScheduleBinding, layer: ScheduleLayer) -> Self {
        Self {
            playlist_id: binding.playlist_id,
            playlist_name: binding.playlist_name.clone(),
            layer,
            binding_id: Some(binding.id),
        }
    }
}

/// Resolve the ordered list of playlists active at `at` (venue-local time).
///
/// Timed playlists whose range contains `at` come first, then full-time
/// playlists; each group is sorted by descending priority with ties kept in
/// creation order. When the device has no active bindings, or nothing
/// matches, the legacy fallback playlist is returned if it is active.
pub fn resolve(
    bindings: &[ScheduleBinding],
    fallback: Option<&FallbackPlaylist>,
    at: NaiveDateTime,
) -> Vec<ResolvedPlaylist> {
    let active: Vec<&ScheduleBinding> = bindings.iter().filter(|b| b.active).collect();
    if active.is_empty() {
        return fallback_only(fallback);
    }

    let weekday = at.weekday();
    let (mut timed, mut full_time): (Vec<&ScheduleBinding>, Vec<&ScheduleBinding>) = active
        .into_iter()
        .filter(|b| b.playlist_active && b.days.contains(weekday))
        .partition(|b| !b.is_full_time());

    timed.retain(|b| b.hours.is_some_and(|range| range.contains(at.time())));

    timed.sort_by(by_priority_then_creation);
    full_time.sort_by(by_priority_then_creation);

    let resolved: Vec<ResolvedPlaylist> = timed
        .iter()
        .map(|b| ResolvedPlaylist::from_binding(b, ScheduleLayer::Timed))
        .chain(
            full_time
                .iter()
                .map(|b| ResolvedPlaylist::from_binding(b, ScheduleLayer::FullTime)),
        )
        .collect();

    if resolved.is_empty() {
        return fallback_only(fallback);
    }
    resolved
}

fn fallback_only(fallback: Option<&FallbackPlaylist>) -> Vec<ResolvedPlaylist> {
    fallback
        .filter(|f| f.active)
        .map(|f| ResolvedPlaylist {
            playlist_id: f.playlist_id,
            playlist_name: f.playlist_name.clone(),
            layer: ScheduleLayer::Fallback,
            binding_id: None,
        })
        .into_iter()
        .collect()
}

fn by_priority_then_creation(a: &&ScheduleBinding, b: &&ScheduleBinding) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
