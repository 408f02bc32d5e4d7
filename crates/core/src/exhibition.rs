//! Playback-completion arithmetic for exhibition logs.

use chrono::Duration;

use crate::error::CoreError;
use crate::schedule::ResolvedPlaylist;
use crate::types::{DbId, Timestamp};

/// Minimum share of the declared duration, in percent, that counts as a full play.
pub const FULL_PLAY_PERCENT: i64 = 90;

/// `elapsed / duration >= 0.90`, computed in integers. Media with a
/// non-positive duration is never fully played.
pub fn is_fully_played(elapsed_secs: i64, duration_secs: i32) -> bool {
    let duration = i64::from(duration_secs);
    if duration <= 0 {
        return false;
    }
    elapsed_secs.saturating_mul(100) >= duration * FULL_PLAY_PERCENT
}

/// Start, end and completion flag of one reported playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    pub started_at: Timestamp,
    pub ended_at: Timestamp,
    pub fully_played: bool,
}

/// Build the report for a playback that ended at `now` after `elapsed_secs`.
pub fn playback_report(
    now: Timestamp,
    elapsed_secs: i64,
    duration_secs: i32,
) -> Result<PlaybackReport, CoreError> {
    if elapsed_secs < 0 {
        return Err(CoreError::Validation(format!(
            "elapsed_secs must be non-negative, got {elapsed_secs}"
        )));
    }
    let elapsed = Duration::try_seconds(elapsed_secs).ok_or_else(|| {
        CoreError::Validation(format!("elapsed_secs out of range: {elapsed_secs}"))
    })?;
    let started_at = now
        .checked_sub_signed(elapsed)
        .ok_or_else(|| CoreError::Validation(format!("elapsed_secs out of range: {elapsed_secs}")))?;

    Ok(PlaybackReport {
        started_at,
        ended_at: now,
        fully_played: is_fully_played(elapsed_secs, duration_secs),
    })
}

/// Pick the playlist an exhibition is logged against: the first resolved
/// playlist that contains the media item, otherwise the first resolved one.
/// A device that resolves to nothing cannot log.
pub fn choose_log_playlist(
    resolved: &[ResolvedPlaylist],
    containing_media: &[DbId],
) -> Result<DbId, CoreError> {
    resolved
        .iter()
        .find(|p| containing_media.contains(&p.playlist_id))
        .or_else(|| resolved.first())
        .map(|p| p.playlist_id)
        .ok_or_else(|| {
            CoreError::InconsistentState(
                "device does not currently resolve to any playlist".to_string(),
            )
        })
}
