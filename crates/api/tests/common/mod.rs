#![allow(dead_code)]

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Datelike, FixedOffset, NaiveTime, Timelike, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use vitrine_api::config::{FeedConfig, ServerConfig};
use vitrine_api::middleware::monitor_key::API_KEY_HEADER;
use vitrine_api::routes;
use vitrine_api::state::AppState;
use vitrine_core::corporate::{
    CorporateContent, CorporateContentResolver, CorporateKind, CorporatePayload, VenueContext,
};
use vitrine_core::error::CoreError;
use vitrine_core::media::MEDIA_STATUS_APPROVED;
use vitrine_core::types::DbId;
use vitrine_db::models::corporate::CreateCorporateContent;
use vitrine_db::models::device::{CreateDevice, Device};
use vitrine_db::models::media::{CreateMediaItem, MediaItemRow};
use vitrine_db::models::operating_window::CreateOperatingWindow;
use vitrine_db::models::playlist::{CreatePlaylist, CreatePlaylistItem};
use vitrine_db::models::schedule::{CreateScheduleBinding, ScheduleBindingRow};
use vitrine_db::repositories::{
    CorporateContentRepo, DeviceRepo, MediaItemRepo, OperatingWindowRepo, PlaylistRepo,
    ScheduleBindingRepo,
};

pub const MONITOR_KEY: &str = "monitor-test-key";

/// Venue offset shared by every test in the binary. Chosen once so that
/// venue-local time is around noon, keeping weekday-based fixtures clear of
/// midnight for the life of the test run.
pub fn venue_offset() -> FixedOffset {
    static OFFSET: OnceLock<FixedOffset> = OnceLock::new();
    *OFFSET.get_or_init(|| {
        let hours = 12 - Utc::now().hour() as i32;
        FixedOffset::east_opt(hours * 3600).unwrap()
    })
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        display_offset: venue_offset(),
        media_base_url: "http://media.test".to_string(),
        public_base_url: "http://play.test".to_string(),
        monitor_api_key: Some(MONITOR_KEY.to_string()),
        feeds: FeedConfig::default(),
    }
}

/// Resolves corporate panels without network access. News always fails so
/// degraded-content handling can be exercised.
pub struct StubResolver;

#[async_trait]
impl CorporateContentResolver for StubResolver {
    async fn resolve(
        &self,
        content: &CorporateContent,
        venue: &VenueContext,
    ) -> Result<CorporatePayload, CoreError> {
        match content.kind {
            CorporateKind::News => Err(CoreError::DegradedContent("news feed down".into())),
            CorporateKind::CustomDesign => Ok(CorporatePayload::RenderRef {
                url: format!("http://media.test/designs/{}.png", content.id),
            }),
            kind => Ok(CorporatePayload::Inline {
                data: serde_json::json!({"kind": kind.as_str(), "venue": venue.name}),
            }),
        }
    }
}

/// Build the full application router with all middleware layers.
///
/// This mirrors the router construction in `main.rs`, with the stub
/// corporate resolver in place of the live feeds.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
        corporate: Arc::new(StubResolver),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(API_KEY_HEADER)])
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::tracking::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_monitored(app: Router, uri: &str) -> Response<Body> {
    get_with_header(app, uri, API_KEY_HEADER, MONITOR_KEY).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub async fn seed_device(pool: &PgPool, external_id: &str) -> Device {
    DeviceRepo::create(
        pool,
        &CreateDevice {
            external_id: external_id.to_string(),
            name: format!("Screen {external_id}"),
            venue_id: None,
            default_playlist_id: None,
            active: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_playlist(pool: &PgPool, name: &str) -> DbId {
    PlaylistRepo::create(
        pool,
        &CreatePlaylist {
            name: name.to_string(),
            active: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub fn media_input(title: &str, duration_secs: i32) -> CreateMediaItem {
    CreateMediaItem {
        title: title.to_string(),
        status_id: Some(MEDIA_STATUS_APPROVED),
        publish_at: None,
        expire_at: None,
        active: None,
        file_path: Some(format!("videos/{title}.mp4")),
        duration_secs,
        qr_destination_url: None,
        qr_caption: None,
        overlay_caption: None,
    }
}

pub async fn seed_media(pool: &PgPool, title: &str, duration_secs: i32) -> MediaItemRow {
    MediaItemRepo::create(pool, &media_input(title, duration_secs))
        .await
        .unwrap()
}

pub async fn seed_corporate(pool: &PgPool, title: &str, kind: CorporateKind) -> DbId {
    CorporateContentRepo::create(
        pool,
        &CreateCorporateContent {
            title: title.to_string(),
            kind,
            duration_secs: 15,
            filter_config: None,
            active: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn add_media(pool: &PgPool, playlist_id: DbId, media_id: DbId, position: i32, repetitions: i32) {
    PlaylistRepo::add_item(
        pool,
        playlist_id,
        &CreatePlaylistItem {
            media_item_id: Some(media_id),
            corporate_content_id: None,
            position,
            repetitions: Some(repetitions),
            active: None,
        },
    )
    .await
    .unwrap();
}

pub async fn add_corporate(pool: &PgPool, playlist_id: DbId, content_id: DbId, position: i32) {
    PlaylistRepo::add_item(
        pool,
        playlist_id,
        &CreatePlaylistItem {
            media_item_id: None,
            corporate_content_id: Some(content_id),
            position,
            repetitions: None,
            active: None,
        },
    )
    .await
    .unwrap();
}

/// Bind `playlist_id` to the device every day, all day.
pub async fn bind_full_time(pool: &PgPool, device_id: DbId, playlist_id: DbId) {
    ScheduleBindingRepo::create(
        pool,
        device_id,
        &CreateScheduleBinding {
            playlist_id,
            name: None,
            days: vec![],
            start_time: None,
            end_time: None,
            priority: None,
            active: None,
        },
    )
    .await
    .unwrap();
}

/// Bind `playlist_id` between `start` and `end` on every day.
pub async fn bind_timed(
    pool: &PgPool,
    device_id: DbId,
    playlist_id: DbId,
    start: NaiveTime,
    end: NaiveTime,
    priority: i32,
) -> ScheduleBindingRow {
    ScheduleBindingRepo::create(
        pool,
        device_id,
        &CreateScheduleBinding {
            playlist_id,
            name: Some("timed".to_string()),
            days: vec![],
            start_time: Some(start),
            end_time: Some(end),
            priority: Some(priority),
            active: None,
        },
    )
    .await
    .unwrap()
}

/// An operating window covering every day except the venue-local today, so
/// the device is powered off for the rest of the test.
pub async fn power_off_today(pool: &PgPool, device_id: DbId) {
    let today = Utc::now()
        .with_timezone(&venue_offset())
        .weekday()
        .num_days_from_monday() as i16;
    let days: Vec<i16> = (0..7).filter(|d| *d != today).collect();
    OperatingWindowRepo::create(
        pool,
        device_id,
        &CreateOperatingWindow {
            name: Some("other days".to_string()),
            days,
            start_time: hm(0, 0),
            end_time: hm(23, 59),
            active: None,
        },
    )
    .await
    .unwrap();
}
