//! Shared-key guard for the monitoring routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sha2::{Digest, Sha256};
use vitrine_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the monitoring key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Proof that the request carried the configured monitoring key.
///
/// With no key configured the monitoring surface is disabled and every
/// request is rejected with 403.
///
/// ```ignore
/// async fn list_devices(_key: RequireMonitorKey, State(state): State<AppState>) -> ...
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireMonitorKey;

impl FromRequestParts<AppState> for RequireMonitorKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.monitor_api_key.as_deref().ok_or_else(|| {
            AppError::Core(CoreError::Forbidden("Monitoring is disabled".into()))
        })?;

        let provided = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing x-api-key header".into()))
            })?;

        if !keys_match(provided, expected) {
            return Err(AppError::Core(CoreError::Unauthorized("Invalid API key".into())));
        }

        Ok(RequireMonitorKey)
    }
}

/// Compare digests so the comparison time does not depend on where the
/// keys first differ.
fn keys_match(provided: &str, expected: &str) -> bool {
    Sha256::digest(provided.as_bytes()) == Sha256::digest(expected.as_bytes())
}
