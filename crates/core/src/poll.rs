//! Device-facing poll model: the loaded schedule of one device and the
//! response it receives.
//!
//! The orchestration (authenticate, heartbeat, gate, resolve, assemble) lives
//! in the API crate because it needs the database. Everything that decides
//! what the response contains is here.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::content::{Assembly, PlayableEntry};
use crate::corporate::VenueContext;
use crate::operating_hours::{self, OperatingWindow};
use crate::schedule::{self, FallbackPlaylist, ResolvedPlaylist, ScheduleBinding};
use crate::types::DbId;

/// Marker sent when the device has nothing to play right now.
pub const NO_ACTIVE_CONTENT: &str = "no active content";

/// Separator between resolved playlist names in the response.
pub const PLAYLIST_NAME_SEPARATOR: &str = " + ";

/// Longest accepted client version string.
pub const MAX_CLIENT_VERSION_LEN: usize = 50;

/// An authenticated, active device.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceProfile {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub venue: VenueContext,
}

/// Everything stored about a device's schedule, loaded once per request.
#[derive(Debug, Clone, Default)]
pub struct DeviceSchedule {
    pub windows: Vec<OperatingWindow>,
    pub bindings: Vec<ScheduleBinding>,
    pub fallback: Option<FallbackPlaylist>,
}

/// Gate decision plus the playlists that would play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePlan {
    pub powered_on: bool,
    pub playlists: Vec<ResolvedPlaylist>,
}

impl DeviceSchedule {
    pub fn is_powered_on(&self, at: NaiveDateTime) -> bool {
        operating_hours::is_powered_on(&self.windows, at)
    }

    pub fn resolve(&self, at: NaiveDateTime) -> Vec<ResolvedPlaylist> {
        schedule::resolve(&self.bindings, self.fallback.as_ref(), at)
    }

    /// Gate first; a powered-off device resolves nothing.
    pub fn plan(&self, at: NaiveDateTime) -> SchedulePlan {
        let powered_on = self.is_powered_on(at);
        let playlists = if powered_on { self.resolve(at) } else { Vec::new() };
        SchedulePlan {
            powered_on,
            playlists,
        }
    }

    /// Bindings that are active, independent of the current time.
    pub fn active_bindings(&self) -> impl Iterator<Item = &ScheduleBinding> {
        self.bindings.iter().filter(|b| b.active)
    }

    pub fn active_windows(&self) -> impl Iterator<Item = &OperatingWindow> {
        self.windows.iter().filter(|w| w.active)
    }
}

/// Check the optional client version sent with a poll.
pub fn validate_client_version(version: Option<&str>) -> Result<Option<&str>, String> {
    match version.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.chars().count() > MAX_CLIENT_VERSION_LEN => Err(format!(
            "client_version must be at most {MAX_CLIENT_VERSION_LEN} characters"
        )),
        Some(v) => Ok(Some(v)),
    }
}

/// What a device receives from a poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollResponse {
    pub device_id: DbId,
    pub device_name: String,
    pub playlist_name: Option<String>,
    pub total_duration_secs: i64,
    pub powered_on: bool,
    pub content_available: bool,
    pub entries: Vec<PlayableEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PollResponse {
    /// Success response carrying the no-content marker.
    pub fn no_active_content(device: &DeviceProfile, powered_on: bool) -> Self {
        Self {
            device_id: device.id,
            device_name: device.name.clone(),
            playlist_name: None,
            total_duration_secs: 0,
            powered_on,
            content_available: false,
            entries: Vec::new(),
            message: Some(NO_ACTIVE_CONTENT.to_string()),
        }
    }

    /// Response for assembled content. An empty assembly still carries the
    /// no-content marker.
    pub fn with_content(
        device: &DeviceProfile,
        playlists: &[ResolvedPlaylist],
        assembly: Assembly,
    ) -> Self {
        if assembly.entries.is_empty() {
            let mut response = Self::no_active_content(device, true);
            response.playlist_name = joined_names(playlists);
            return response;
        }
        Self {
            device_id: device.id,
            device_name: device.name.clone(),
            playlist_name: joined_names(playlists),
            total_duration_secs: assembly.total_duration_secs(),
            powered_on: true,
            content_available: true,
            entries: assembly.entries,
            message: None,
        }
    }
}

fn joined_names(playlists: &[ResolvedPlaylist]) -> Option<String> {
    if playlists.is_empty() {
        return None;
    }
    Some(
        playlists
            .iter()
            .map(|p| p.playlist_name.as_str())
            .collect::<Vec<_>>()
            .join(PLAYLIST_NAME_SEPARATOR),
    )
}
