//! Device poll: authenticate, heartbeat, gate, resolve, assemble, respond.
//!
//! Each stage is its own type and can only be built from the previous one:
//! [`AuthenticatedDevice`] -> [`ResolvedPoll`] -> [`PollResponse`]. The
//! heartbeat write during authentication is the only side effect.

use sqlx::PgPool;
use vitrine_core::content::{assemble_device, AssemblyContext, AssetUrls, PlaylistContent};
use vitrine_core::corporate::CorporateContentResolver;
use vitrine_core::error::CoreError;
use vitrine_core::poll::{validate_client_version, DeviceProfile, PollResponse, SchedulePlan};
use vitrine_core::types::Moment;
use vitrine_db::models::device::Device;
use vitrine_db::repositories::DeviceRepo;

use super::snapshot;
use crate::error::AppResult;
use crate::state::AppState;

/// A known, active device whose heartbeat has been recorded.
#[derive(Debug)]
pub struct AuthenticatedDevice {
    device: Device,
    profile: DeviceProfile,
}

impl AuthenticatedDevice {
    /// Look up an active device by external id and record its heartbeat.
    ///
    /// Unknown or inactive devices are rejected with `NotFound` before any
    /// write happens.
    pub async fn authenticate(
        pool: &PgPool,
        external_id: &str,
        client_version: Option<&str>,
        at: Moment,
    ) -> AppResult<Self> {
        let external_id = external_id.trim();
        if external_id.is_empty() {
            return Err(CoreError::Validation("external_id must not be blank".into()).into());
        }
        let client_version = validate_client_version(client_version).map_err(CoreError::Validation)?;

        let device = DeviceRepo::find_active_by_external_id(pool, external_id)
            .await?
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "Device",
                key: external_id.to_string(),
            })?;

        DeviceRepo::touch_heartbeat(pool, device.id, at.utc, client_version).await?;

        let profile = device.to_profile();
        Ok(Self { device, profile })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Gate and resolve at `at`, then load the resolved playlists' items.
    pub async fn resolve(self, pool: &PgPool, at: Moment) -> AppResult<ResolvedPoll> {
        let schedule = snapshot::load_schedule(pool, &self.device).await?;
        let plan = schedule.plan(at.local);
        let playlists = snapshot::load_playlists(pool, &plan.playlists).await?;

        tracing::debug!(
            device_id = self.profile.id,
            powered_on = plan.powered_on,
            playlists = plan.playlists.len(),
            "Schedule resolved"
        );

        Ok(ResolvedPoll {
            profile: self.profile,
            plan,
            playlists,
            at,
        })
    }
}

/// Gate decision and loaded playlists, ready for assembly.
#[derive(Debug)]
pub struct ResolvedPoll {
    profile: DeviceProfile,
    plan: SchedulePlan,
    playlists: Vec<PlaylistContent>,
    at: Moment,
}

impl ResolvedPoll {
    pub fn plan(&self) -> &SchedulePlan {
        &self.plan
    }

    /// Assemble the entries and build the response. Corporate items that
    /// fail to resolve are dropped and logged; the poll still succeeds.
    pub async fn respond(
        self,
        resolver: &dyn CorporateContentResolver,
        urls: &AssetUrls,
    ) -> PollResponse {
        if !self.plan.powered_on {
            return PollResponse::no_active_content(&self.profile, false);
        }
        if self.plan.playlists.is_empty() {
            return PollResponse::no_active_content(&self.profile, true);
        }

        let ctx = AssemblyContext {
            resolver,
            venue: &self.profile.venue,
            urls,
        };
        let assembly = assemble_device(&self.playlists, self.at.utc, &ctx).await;

        for degraded in &assembly.degraded {
            tracing::warn!(
                device_id = self.profile.id,
                playlist_id = degraded.playlist_id,
                item_id = degraded.item_id,
                content_id = degraded.content_id,
                reason = %degraded.reason,
                "Corporate content unavailable, entry dropped"
            );
        }

        PollResponse::with_content(&self.profile, &self.plan.playlists, assembly)
    }
}

/// Run a full poll for `external_id` at the current instant.
pub async fn serve_poll(
    state: &AppState,
    external_id: &str,
    client_version: Option<&str>,
) -> AppResult<PollResponse> {
    let at = state.now();
    let device =
        AuthenticatedDevice::authenticate(&state.pool, external_id, client_version, at).await?;
    let resolved = device.resolve(&state.pool, at).await?;
    let urls = state.config.asset_urls();
    Ok(resolved.respond(state.corporate.as_ref(), &urls).await)
}
