//! Integration tests for the device poll:
//! - Content assembly with repetitions and corporate panels
//! - Timed overlays ahead of the full-time base, and repeatable output
//! - No-content responses (powered off, nothing bound)
//! - Heartbeat and client version writes
//! - Rejection of unknown, inactive and malformed requests

mod common;

use axum::http::StatusCode;
use common::{
    add_corporate, add_media, bind_full_time, bind_timed, body_json, hm, post_json,
    power_off_today, seed_corporate, seed_device, seed_media, seed_playlist,
};
use serde_json::json;
use sqlx::PgPool;
use vitrine_core::corporate::CorporateKind;
use vitrine_db::models::device::CreateDevice;
use vitrine_db::repositories::{DeviceRepo, MediaItemRepo};

const POLL: &str = "/api/v1/tv/poll";

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn poll_expands_repetitions(pool: PgPool) {
    let device = seed_device(&pool, "tv-001").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let media = seed_media(&pool, "promo", 30).await;
    add_media(&pool, playlist, media.id, 1, 2).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let response = post_json(app, POLL, json!({"external_id": "tv-001"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["device_id"], device.id);
    assert_eq!(data["playlist_name"], "Main");
    assert_eq!(data["content_available"], true);
    assert_eq!(data["total_duration_secs"], 60);
    assert!(data.get("message").is_none());

    let entries = data["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry["type"], "media");
        assert_eq!(entry["asset_url"], "http://media.test/videos/promo.mp4");
        assert_eq!(entry["duration_secs"], 30);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_corporate_panel_is_dropped(pool: PgPool) {
    let device = seed_device(&pool, "tv-002").await;
    let playlist = seed_playlist(&pool, "Mixed").await;
    let media = seed_media(&pool, "clip", 20).await;
    let weather = seed_corporate(&pool, "Weather", CorporateKind::Weather).await;
    let news = seed_corporate(&pool, "News", CorporateKind::News).await;
    add_corporate(&pool, playlist, weather, 1).await;
    add_media(&pool, playlist, media.id, 2, 1).await;
    add_corporate(&pool, playlist, news, 3).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let json = body_json(post_json(app, POLL, json!({"external_id": "tv-002"})).await).await;

    let entries = json["data"]["entries"].as_array().unwrap();
    let types: Vec<&str> = entries.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(types, vec!["corporate", "media"]);
    assert_eq!(entries[0]["kind"], "weather");
    assert_eq!(entries[0]["payload"]["format"], "inline");
    assert_eq!(json["data"]["total_duration_secs"], 35);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn timed_binding_precedes_full_time(pool: PgPool) {
    let device = seed_device(&pool, "tv-004").await;
    let base = seed_playlist(&pool, "Base").await;
    let lunch = seed_playlist(&pool, "Lunch").await;
    let night = seed_playlist(&pool, "Night").await;
    let base_clip = seed_media(&pool, "base", 20).await;
    let lunch_clip = seed_media(&pool, "lunch", 10).await;
    let night_clip = seed_media(&pool, "night", 5).await;
    add_media(&pool, base, base_clip.id, 1, 1).await;
    add_media(&pool, lunch, lunch_clip.id, 1, 1).await;
    add_media(&pool, night, night_clip.id, 1, 1).await;

    // Venue-local time in tests sits around noon.
    bind_full_time(&pool, device.id, base).await;
    let row = bind_timed(&pool, device.id, lunch, hm(10, 0), hm(15, 30), -5).await;
    assert_eq!(row.start_time, Some(hm(10, 0)));
    assert_eq!(row.end_time, Some(hm(15, 30)));
    bind_timed(&pool, device.id, night, hm(1, 0), hm(3, 0), 10).await;

    let app = common::build_test_app(pool);
    let json = body_json(post_json(app, POLL, json!({"external_id": "tv-004"})).await).await;
    let data = &json["data"];

    assert_eq!(data["playlist_name"], "Lunch + Base");
    assert_eq!(data["total_duration_secs"], 30);
    let assets: Vec<&str> = data["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["asset_url"].as_str().unwrap())
        .collect();
    assert_eq!(
        assets,
        vec![
            "http://media.test/videos/lunch.mp4",
            "http://media.test/videos/base.mp4",
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_polls_return_identical_content(pool: PgPool) {
    let device = seed_device(&pool, "tv-005").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let media = seed_media(&pool, "promo", 30).await;
    let weather = seed_corporate(&pool, "Weather", CorporateKind::Weather).await;
    add_media(&pool, playlist, media.id, 1, 2).await;
    add_corporate(&pool, playlist, weather, 2).await;
    bind_full_time(&pool, device.id, playlist).await;

    let first = body_json(
        post_json(common::build_test_app(pool.clone()), POLL, json!({"external_id": "tv-005"})).await,
    )
    .await;
    let second = body_json(
        post_json(common::build_test_app(pool), POLL, json!({"external_id": "tv-005"})).await,
    )
    .await;

    assert_eq!(first["data"]["total_duration_secs"], 75);
    assert_eq!(first["data"], second["data"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn qr_code_block_uses_tracking_url(pool: PgPool) {
    let device = seed_device(&pool, "tv-003").await;
    let playlist = seed_playlist(&pool, "QR").await;
    let mut input = common::media_input("offer", 10);
    input.qr_destination_url = Some("https://shop.test/offer".to_string());
    input.qr_caption = Some("Scan me".to_string());
    let media = MediaItemRepo::create(&pool, &input).await.unwrap();
    add_media(&pool, playlist, media.id, 1, 1).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let json = body_json(post_json(app, POLL, json!({"external_id": "tv-003"})).await).await;

    let qr = &json["data"]["entries"][0]["qr_code"];
    assert_eq!(
        qr["tracking_url"],
        format!("http://play.test/r/{}", media.qr_tracking_code)
    );
    assert_eq!(qr["caption"], "Scan me");
}

// ---------------------------------------------------------------------------
// No content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unbound_device_gets_no_content_marker(pool: PgPool) {
    seed_device(&pool, "tv-010").await;

    let app = common::build_test_app(pool);
    let response = post_json(app, POLL, json!({"external_id": "tv-010"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["content_available"], false);
    assert_eq!(json["data"]["entries"], json!([]));
    assert_eq!(json["data"]["message"], "no active content");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn powered_off_device_gets_no_content(pool: PgPool) {
    let device = seed_device(&pool, "tv-011").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let media = seed_media(&pool, "promo", 30).await;
    add_media(&pool, playlist, media.id, 1, 1).await;
    bind_full_time(&pool, device.id, playlist).await;
    power_off_today(&pool, device.id).await;

    let app = common::build_test_app(pool);
    let json = body_json(post_json(app, POLL, json!({"external_id": "tv-011"})).await).await;

    assert_eq!(json["data"]["powered_on"], false);
    assert_eq!(json["data"]["content_available"], false);
    assert_eq!(json["data"]["message"], "no active content");
}

// ---------------------------------------------------------------------------
// Heartbeat
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn poll_records_heartbeat_and_version(pool: PgPool) {
    let device = seed_device(&pool, "tv-020").await;
    assert!(device.last_heartbeat_at.is_none());

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        POLL,
        json!({"external_id": "tv-020", "client_version": "2.4.1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = DeviceRepo::find_by_id(&pool, device.id).await.unwrap().unwrap();
    assert!(stored.last_heartbeat_at.is_some());
    assert_eq!(stored.client_version.as_deref(), Some("2.4.1"));
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_device_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, POLL, json!({"external_id": "nope"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_device_is_rejected_without_heartbeat(pool: PgPool) {
    let input = CreateDevice {
        external_id: "tv-030".to_string(),
        name: "Off".to_string(),
        venue_id: None,
        default_playlist_id: None,
        active: Some(false),
    };
    let device = DeviceRepo::create(&pool, &input).await.unwrap();

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, POLL, json!({"external_id": "tv-030"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let stored = DeviceRepo::find_by_id(&pool, device.id).await.unwrap().unwrap();
    assert!(stored.last_heartbeat_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn blank_external_id_is_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, POLL, json!({"external_id": "   "})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_client_version_is_400(pool: PgPool) {
    seed_device(&pool, "tv-040").await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        POLL,
        json!({"external_id": "tv-040", "client_version": "v".repeat(51)}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_external_id_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, POLL, json!({"client_version": "1.0"})).await;
    assert!(response.status().is_client_error());
}
