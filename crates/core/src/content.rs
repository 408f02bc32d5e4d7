//! Content assembly: expand playlists into the flat sequence a device plays.
//!
//! Each playlist item references exactly one source, either a media file or a
//! corporate panel. The source is a closed enum and both the assembler and the
//! serialized [`PlayableEntry`] match on it explicitly.
//!
//! Corporate panels are resolved through a [`CorporateContentResolver`]. A
//! failed resolution drops that item only; it is reported back in
//! [`Assembly::degraded`] so the caller can log it.

use std::collections::HashMap;
use std::iter;

use futures::future::join_all;
use serde::Serialize;

use crate::corporate::{
    CorporateContent, CorporateContentResolver, CorporateKind, CorporatePayload, VenueContext,
};
use crate::error::CoreError;
use crate::media::MediaItem;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Input model
// ---------------------------------------------------------------------------

/// The single source a playlist item points at.
#[derive(Debug, Clone)]
pub enum ItemSource {
    Media(MediaItem),
    Corporate(CorporateContent),
}

#[derive(Debug, Clone)]
pub struct PlaylistItem {
    pub id: DbId,
    /// Ordering key within the playlist.
    pub position: i32,
    /// Number of consecutive plays; always >= 1.
    pub repetitions: i32,
    pub active: bool,
    pub source: ItemSource,
}

/// A playlist with its items loaded.
#[derive(Debug, Clone)]
pub struct PlaylistContent {
    pub id: DbId,
    pub name: String,
    pub items: Vec<PlaylistItem>,
}

// ---------------------------------------------------------------------------
// Output model
// ---------------------------------------------------------------------------

/// QR call-to-action shown over a media entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QrCodeBlock {
    pub tracking_url: String,
    pub caption: String,
}

/// One renderable unit with a declared duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayableEntry {
    Media {
        id: DbId,
        title: String,
        asset_url: String,
        duration_secs: i32,
        active: bool,
        overlay_caption: Option<String>,
        qr_code: Option<QrCodeBlock>,
    },
    Corporate {
        id: DbId,
        title: String,
        kind: CorporateKind,
        asset_url: Option<String>,
        duration_secs: i32,
        active: bool,
        payload: CorporatePayload,
    },
}

impl PlayableEntry {
    pub fn duration_secs(&self) -> i32 {
        match self {
            Self::Media { duration_secs, .. } | Self::Corporate { duration_secs, .. } => {
                *duration_secs
            }
        }
    }
}

/// A corporate item that could not be resolved and was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedItem {
    pub playlist_id: DbId,
    pub item_id: DbId,
    pub content_id: DbId,
    pub reason: String,
}

/// Assembler output: entries in play order plus any degraded items.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub entries: Vec<PlayableEntry>,
    pub degraded: Vec<DegradedItem>,
}

impl Assembly {
    /// Sum of the declared entry durations.
    pub fn total_duration_secs(&self) -> i64 {
        self.entries
            .iter()
            .map(|e| i64::from(e.duration_secs()))
            .sum()
    }

    fn append(&mut self, other: Assembly) {
        self.entries.extend(other.entries);
        self.degraded.extend(other.degraded);
    }
}

// ---------------------------------------------------------------------------
// URLs
// ---------------------------------------------------------------------------

/// Builds absolute URLs for stored media and QR tracking links.
#[derive(Debug, Clone)]
pub struct AssetUrls {
    media_base_url: String,
    public_base_url: String,
}

impl AssetUrls {
    pub fn new(media_base_url: &str, public_base_url: &str) -> Self {
        Self {
            media_base_url: media_base_url.trim_end_matches('/').to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn asset_url(&self, file_path: &str) -> String {
        format!("{}/{}", self.media_base_url, file_path.trim_start_matches('/'))
    }

    pub fn tracking_url(&self, tracking_code: &str) -> String {
        format!("{}/r/{tracking_code}", self.public_base_url)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Everything the assembler needs besides the playlist and the clock.
pub struct AssemblyContext<'a> {
    pub resolver: &'a dyn CorporateContentResolver,
    pub venue: &'a VenueContext,
    pub urls: &'a AssetUrls,
}

/// Expand one playlist into its ordered entries.
///
/// Active items are taken in ordering-key order. Media items are skipped when
/// inactive, missing their file, or not visible at `now`. Corporate items are
/// skipped when inactive and dropped (reported as degraded) when resolution
/// fails. Every emitted item appears `repetitions` times in a row.
pub async fn assemble(playlist: &PlaylistContent, now: Timestamp, ctx: &AssemblyContext<'_>) -> Assembly {
    let mut items: Vec<&PlaylistItem> = playlist.items.iter().filter(|i| i.active).collect();
    items.sort_by_key(|i| (i.position, i.id));

    let mut resolved = resolve_corporate(&items, ctx).await;
    let mut assembly = Assembly::default();

    for item in items {
        let repetitions = usize::try_from(item.repetitions.max(1)).unwrap_or(1);
        match &item.source {
            ItemSource::Media(media) => {
                if let Some(entry) = media_entry(media, now, ctx.urls) {
                    assembly
                        .entries
                        .extend(iter::repeat(entry).take(repetitions));
                }
            }
            ItemSource::Corporate(content) => match resolved.remove(&item.id) {
                Some(Ok(payload)) => {
                    let entry = corporate_entry(content, payload);
                    assembly
                        .entries
                        .extend(iter::repeat(entry).take(repetitions));
                }
                Some(Err(err)) => assembly.degraded.push(DegradedItem {
                    playlist_id: playlist.id,
                    item_id: item.id,
                    content_id: content.id,
                    reason: err.to_string(),
                }),
                // Inactive corporate content is never resolved.
                None => {}
            },
        }
    }

    assembly
}

/// Concatenate the assemblies of `playlists` in the given order; playlists
/// are never interleaved.
pub async fn assemble_device(
    playlists: &[PlaylistContent],
    now: Timestamp,
    ctx: &AssemblyContext<'_>,
) -> Assembly {
    let mut combined = Assembly::default();
    for playlist in playlists {
        combined.append(assemble(playlist, now, ctx).await);
    }
    combined
}

/// Resolve every active corporate item concurrently, keyed by item id.
async fn resolve_corporate(
    items: &[&PlaylistItem],
    ctx: &AssemblyContext<'_>,
) -> HashMap<DbId, Result<CorporatePayload, CoreError>> {
    let pending: Vec<(DbId, &CorporateContent)> = items
        .iter()
        .filter_map(|item| match &item.source {
            ItemSource::Corporate(content) if content.active => Some((item.id, content)),
            _ => None,
        })
        .collect();

    let results = join_all(
        pending
            .iter()
            .map(|(_, content)| ctx.resolver.resolve(content, ctx.venue)),
    )
    .await;

    pending
        .into_iter()
        .map(|(item_id, _)| item_id)
        .zip(results)
        .collect()
}

fn media_entry(media: &MediaItem, now: Timestamp, urls: &AssetUrls) -> Option<PlayableEntry> {
    if !media.is_playable(now) {
        return None;
    }
    let file_path = media.stored_file()?;

    let qr_code = media.qr.as_ref().map(|qr| QrCodeBlock {
        tracking_url: urls.tracking_url(&qr.tracking_code),
        caption: qr.caption.clone().unwrap_or_default(),
    });

    Some(PlayableEntry::Media {
        id: media.id,
        title: media.title.clone(),
        asset_url: urls.asset_url(file_path),
        duration_secs: media.duration_secs,
        active: media.active,
        overlay_caption: media.overlay_caption.clone(),
        qr_code,
    })
}

fn corporate_entry(content: &CorporateContent, payload: CorporatePayload) -> PlayableEntry {
    PlayableEntry::Corporate {
        id: content.id,
        title: content.title.clone(),
        kind: content.kind,
        asset_url: payload.asset_url().map(str::to_string),
        duration_secs: content.duration_secs,
        active: true,
        payload,
    }
}
