//! QR code click tracking.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Redirect;
use vitrine_core::error::CoreError;
use vitrine_db::models::tracking::CreateQrCodeClick;
use vitrine_db::repositories::{MediaItemRepo, QrClickRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// Longest stored user agent, in characters.
const MAX_USER_AGENT_LEN: usize = 500;

/// GET /r/{tracking_code}
///
/// Record the click and send the viewer on to the media item's destination.
pub async fn follow_qr_code(
    State(state): State<AppState>,
    Path(tracking_code): Path<String>,
    headers: HeaderMap,
) -> AppResult<Redirect> {
    let not_found = || CoreError::NotFoundByKey {
        entity: "QrCode",
        key: tracking_code.clone(),
    };

    let media = MediaItemRepo::find_by_tracking_code(&state.pool, &tracking_code)
        .await?
        .ok_or_else(not_found)?;
    let destination = media
        .qr_destination_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(not_found)?
        .to_string();

    let click = QrClickRepo::create(
        &state.pool,
        &CreateQrCodeClick {
            media_item_id: media.id,
            tracking_code: tracking_code.clone(),
            client_ip: client_ip(&headers),
            user_agent: header_str(&headers, "user-agent")
                .map(|ua| ua.chars().take(MAX_USER_AGENT_LEN).collect()),
            referer: header_str(&headers, "referer").map(str::to_string),
        },
    )
    .await?;

    tracing::info!(click_id = click.id, media_item_id = media.id, "QR code followed");

    Ok(Redirect::to(&destination))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| header_str(headers, "x-real-ip"))
        .map(str::to_string)
}
