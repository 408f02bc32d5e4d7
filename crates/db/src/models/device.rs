//! Device and venue models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::corporate::VenueContext;
use vitrine_core::poll::DeviceProfile;
use vitrine_core::schedule::FallbackPlaylist;
use vitrine_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Venue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: DbId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateVenue {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// A device row joined with its venue and legacy default playlist.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub venue_id: Option<DbId>,
    pub default_playlist_id: Option<DbId>,
    pub last_heartbeat_at: Option<Timestamp>,
    pub client_version: Option<String>,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub venue_name: Option<String>,
    pub venue_latitude: Option<f64>,
    pub venue_longitude: Option<f64>,
    pub default_playlist_name: Option<String>,
    pub default_playlist_active: Option<bool>,
}

impl Device {
    pub fn venue_context(&self) -> VenueContext {
        VenueContext {
            name: self.venue_name.clone().unwrap_or_default(),
            latitude: self.venue_latitude,
            longitude: self.venue_longitude,
        }
    }

    pub fn to_profile(&self) -> DeviceProfile {
        DeviceProfile {
            id: self.id,
            external_id: self.external_id.clone(),
            name: self.name.clone(),
            venue: self.venue_context(),
        }
    }

    /// The legacy single-playlist assignment, if one is set.
    pub fn fallback_playlist(&self) -> Option<FallbackPlaylist> {
        let playlist_id = self.default_playlist_id?;
        Some(FallbackPlaylist {
            playlist_id,
            playlist_name: self.default_playlist_name.clone().unwrap_or_default(),
            active: self.default_playlist_active.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub external_id: String,
    pub name: String,
    pub venue_id: Option<DbId>,
    pub default_playlist_id: Option<DbId>,
    /// Defaults to `true` when omitted.
    pub active: Option<bool>,
}
