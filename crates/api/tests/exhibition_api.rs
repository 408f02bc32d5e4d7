//! Integration tests for exhibition logging.

mod common;

use axum::http::StatusCode;
use common::{add_media, bind_full_time, body_json, post_json, seed_device, seed_media, seed_playlist};
use serde_json::json;
use sqlx::PgPool;
use vitrine_db::repositories::ExhibitionLogRepo;

const LOG: &str = "/api/v1/tv/exhibition-log";

#[sqlx::test(migrations = "../../db/migrations")]
async fn report_is_logged_against_containing_playlist(pool: PgPool) {
    let device = seed_device(&pool, "tv-100").await;
    let first = seed_playlist(&pool, "First").await;
    let second = seed_playlist(&pool, "Second").await;
    let media = seed_media(&pool, "promo", 30).await;
    let other = seed_media(&pool, "other", 30).await;
    add_media(&pool, first, other.id, 1, 1).await;
    add_media(&pool, second, media.id, 1, 1).await;
    bind_full_time(&pool, device.id, first).await;
    bind_full_time(&pool, device.id, second).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": media.id, "elapsed_secs": 27}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["playlist_id"], second);
    assert_eq!(json["data"]["fully_played"], true);

    let logs = ExhibitionLogRepo::list_by_device(&pool, device.id, 10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].ended_at - logs[0].started_at, chrono::Duration::seconds(27));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn short_playback_is_not_fully_played(pool: PgPool) {
    let device = seed_device(&pool, "tv-101").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let media = seed_media(&pool, "promo", 30).await;
    add_media(&pool, playlist, media.id, 1, 1).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": media.id, "elapsed_secs": 26}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["fully_played"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn media_outside_resolved_playlists_uses_first(pool: PgPool) {
    let device = seed_device(&pool, "tv-102").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let loose = seed_media(&pool, "loose", 30).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": loose.id, "elapsed_secs": 30}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["playlist_id"], playlist);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn device_without_playlists_is_409(pool: PgPool) {
    let device = seed_device(&pool, "tv-103").await;
    let media = seed_media(&pool, "promo", 30).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": media.id, "elapsed_secs": 30}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "INCONSISTENT_STATE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn negative_elapsed_is_400(pool: PgPool) {
    let device = seed_device(&pool, "tv-104").await;
    let playlist = seed_playlist(&pool, "Main").await;
    let media = seed_media(&pool, "promo", 30).await;
    bind_full_time(&pool, device.id, playlist).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": media.id, "elapsed_secs": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_device_or_media_is_404(pool: PgPool) {
    let device = seed_device(&pool, "tv-105").await;
    let media = seed_media(&pool, "promo", 30).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        LOG,
        json!({"device_id": 999_999, "media_item_id": media.id, "elapsed_secs": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        LOG,
        json!({"device_id": device.id, "media_item_id": 999_999, "elapsed_secs": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
