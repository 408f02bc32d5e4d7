//! Corporate content: dynamically rendered panels (weather, quotes, news,
//! custom designs) that take the place of a literal media file.
//!
//! Resolving a panel into something the device can render is delegated to a
//! [`CorporateContentResolver`]; the assembler only knows the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

pub const KIND_WEATHER: &str = "weather";
pub const KIND_QUOTES: &str = "quotes";
pub const KIND_NEWS: &str = "news";
pub const KIND_CUSTOM_DESIGN: &str = "custom_design";

/// All valid corporate content kinds (mirrors the `corporate_contents.kind` check).
pub const VALID_KINDS: &[&str] = &[KIND_WEATHER, KIND_QUOTES, KIND_NEWS, KIND_CUSTOM_DESIGN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorporateKind {
    Weather,
    Quotes,
    News,
    CustomDesign,
}

impl CorporateKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_WEATHER => Ok(Self::Weather),
            KIND_QUOTES => Ok(Self::Quotes),
            KIND_NEWS => Ok(Self::News),
            KIND_CUSTOM_DESIGN => Ok(Self::CustomDesign),
            _ => Err(format!(
                "Invalid corporate content kind '{s}'. Must be one of: {}",
                VALID_KINDS.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weather => KIND_WEATHER,
            Self::Quotes => KIND_QUOTES,
            Self::News => KIND_NEWS,
            Self::CustomDesign => KIND_CUSTOM_DESIGN,
        }
    }
}

// ---------------------------------------------------------------------------
// Content reference
// ---------------------------------------------------------------------------

/// Type-specific filter configuration stored as JSONB.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateFilter {
    /// Currency codes for quote panels (e.g. `USD`, `EUR`).
    #[serde(default)]
    pub currencies: Vec<String>,
    /// Crypto asset codes for quote panels (e.g. `BTC`).
    #[serde(default)]
    pub crypto: Vec<String>,
    /// Pre-rendered asset for custom-design panels.
    #[serde(default)]
    pub asset_path: Option<String>,
}

impl CorporateFilter {
    /// Parse the stored JSON, treating `null` as an empty filter.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone()).map_err(|e| format!("Invalid filter config: {e}"))
    }
}

/// A corporate panel as referenced from a playlist item.
#[derive(Debug, Clone, Serialize)]
pub struct CorporateContent {
    pub id: DbId,
    pub title: String,
    pub kind: CorporateKind,
    pub duration_secs: i32,
    pub active: bool,
    pub filter: CorporateFilter,
}

/// Where the device is installed; weather panels need the coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VenueContext {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VenueContext {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Resolver seam
// ---------------------------------------------------------------------------

/// What the device receives for a corporate panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum CorporatePayload {
    /// A URL to an already rendered image or video.
    RenderRef { url: String },
    /// Structured data the device renders itself.
    Inline { data: serde_json::Value },
}

impl CorporatePayload {
    /// The asset URL for render references; inline payloads have none.
    pub fn asset_url(&self) -> Option<&str> {
        match self {
            Self::RenderRef { url } => Some(url),
            Self::Inline { .. } => None,
        }
    }
}

/// Turns a corporate content reference into a renderable payload.
///
/// Implementations may call external services. Errors are isolated per item
/// by the assembler and should use [`CoreError::DegradedContent`].
#[async_trait]
pub trait CorporateContentResolver: Send + Sync {
    async fn resolve(
        &self,
        content: &CorporateContent,
        venue: &VenueContext,
    ) -> Result<CorporatePayload, CoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trip() {
        for kind in [
            CorporateKind::Weather,
            CorporateKind::Quotes,
            CorporateKind::News,
            CorporateKind::CustomDesign,
        ] {
            assert_eq!(CorporateKind::from_str_value(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_lists_valid_values() {
        let err = CorporateKind::from_str_value("horoscope").unwrap_err();
        assert!(err.contains("weather"));
        assert!(err.contains("custom_design"));
    }

    #[test]
    fn filter_parses_partial_json() {
        let filter =
            CorporateFilter::from_json(&serde_json::json!({ "currencies": ["USD"] })).unwrap();
        assert_eq!(filter.currencies, vec!["USD"]);
        assert!(filter.crypto.is_empty());
        assert_eq!(filter.asset_path, None);
    }

    #[test]
    fn null_filter_is_empty() {
        let filter = CorporateFilter::from_json(&serde_json::Value::Null).unwrap();
        assert_eq!(filter, CorporateFilter::default());
    }

    #[test]
    fn malformed_filter_is_rejected() {
        assert!(CorporateFilter::from_json(&serde_json::json!({ "currencies": 3 })).is_err());
    }

    #[test]
    fn payload_serializes_with_format_tag() {
        let payload = CorporatePayload::RenderRef {
            url: "https://cdn.example/panel.png".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["format"], "render_ref");
        assert_eq!(payload.asset_url(), Some("https://cdn.example/panel.png"));
    }

    #[test]
    fn venue_coordinates_require_both() {
        let venue = VenueContext {
            name: "Centro".to_string(),
            latitude: Some(-23.5),
            longitude: None,
        };
        assert_eq!(venue.coordinates(), None);
    }
}
