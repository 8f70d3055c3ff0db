//! Integration tests for the preset gallery endpoints.
//!
//! - `GET  /api/presets`            list, most liked first
//! - `POST /api/presets`            create (201, validation)
//! - `POST /api/presets/{id}/like`  like (count, 404, concurrency)

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_empty, post_json, post_raw, TestApp};
use pfx_db::repositories::PresetRepo;
use serde_json::json;
use sqlx::SqlitePool;

/// Create a preset through the API and return its id.
async fn create(app: &TestApp, name: &str) -> i64 {
    let response = post_json(
        app.router(),
        "/api/presets",
        json!({"name": name, "config": {"emitter": "point"}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn create_returns_201_with_full_record(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = post_json(
        app.router(),
        "/api/presets",
        json!({
            "name": "Fireworks",
            "description": "Bursts of colour",
            "config": {"rate": 120, "colors": ["#f00", "#0f0"], "gravity": -9.8}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["name"], "Fireworks");
    assert_eq!(json["description"], "Bursts of colour");
    assert_eq!(json["likes"], 0);
    assert_eq!(json["config"]["rate"], 120);
    assert_eq!(json["config"]["colors"][1], "#0f0");
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = false)]
async fn create_without_description_defaults_to_empty(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = post_json(
        app.router(),
        "/api/presets",
        json!({"name": "Snow", "config": {}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["description"], "");
}

#[sqlx::test(migrations = false)]
async fn config_round_trips_through_list(pool: SqlitePool) {
    let app = TestApp::new(pool).await;
    let config = json!({"nested": {"a": [1, 2, {"b": null}]}, "flag": true});

    post_json(
        app.router(),
        "/api/presets",
        json!({"name": "Nested", "config": config.clone()}),
    )
    .await;

    let listed = body_json(get(app.router(), "/api/presets").await).await;
    assert_eq!(listed[0]["config"], config);
}

#[sqlx::test(migrations = false)]
async fn create_missing_name_is_validation_error(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = post_json(app.router(), "/api/presets", json!({"config": {}})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    assert_eq!(PresetRepo::count(&app.pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
async fn create_missing_or_null_config_is_validation_error(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    for body in [json!({"name": "x"}), json!({"name": "x", "config": null})] {
        let response = post_json(app.router(), "/api/presets", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
    assert_eq!(PresetRepo::count(&app.pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
async fn create_with_over_long_fields_is_rejected(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let long_name = post_json(
        app.router(),
        "/api/presets",
        json!({"name": "n".repeat(101), "config": {}}),
    )
    .await;
    assert_eq!(long_name.status(), StatusCode::BAD_REQUEST);

    let long_description = post_json(
        app.router(),
        "/api/presets",
        json!({"name": "ok", "description": "d".repeat(501), "config": {}}),
    )
    .await;
    assert_eq!(long_description.status(), StatusCode::BAD_REQUEST);

    assert_eq!(PresetRepo::count(&app.pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
async fn create_with_malformed_json_is_bad_request(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = post_raw(app.router(), "/api/presets", "{\"name\": ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn list_on_empty_store_is_empty_array(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = get(app.router(), "/api/presets").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[sqlx::test(migrations = false)]
async fn list_orders_by_likes_descending(pool: SqlitePool) {
    let app = TestApp::new(pool).await;
    let a = create(&app, "A").await;
    let b = create(&app, "B").await;
    let c = create(&app, "C").await;

    for _ in 0..5 {
        post_empty(app.router(), &format!("/api/presets/{b}/like")).await;
    }
    for _ in 0..2 {
        post_empty(app.router(), &format!("/api/presets/{c}/like")).await;
    }

    let listed = body_json(get(app.router(), "/api/presets").await).await;
    let items = listed.as_array().unwrap();
    let order: Vec<(i64, i64)> = items
        .iter()
        .map(|p| (p["id"].as_i64().unwrap(), p["likes"].as_i64().unwrap()))
        .collect();
    assert_eq!(order, vec![(b, 5), (c, 2), (a, 0)]);
}

// ---------------------------------------------------------------------------
// Like
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn like_increments_and_returns_count(pool: SqlitePool) {
    let app = TestApp::new(pool).await;
    let id = create(&app, "Likeable").await;

    let first = post_empty(app.router(), &format!("/api/presets/{id}/like")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await, json!({"likes": 1}));

    let second = post_empty(app.router(), &format!("/api/presets/{id}/like")).await;
    assert_eq!(body_json(second).await, json!({"likes": 2}));
}

#[sqlx::test(migrations = false)]
async fn like_unknown_preset_returns_404(pool: SqlitePool) {
    let app = TestApp::new(pool).await;
    let id = create(&app, "Only").await;

    let response = post_empty(app.router(), &format!("/api/presets/{}/like", id + 1)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], format!("Preset with id {} not found", id + 1));

    let listed = body_json(get(app.router(), "/api/presets").await).await;
    assert_eq!(listed[0]["likes"], 0);
}

#[sqlx::test(migrations = false)]
async fn like_with_non_numeric_id_is_bad_request(pool: SqlitePool) {
    let app = TestApp::new(pool).await;

    let response = post_empty(app.router(), "/api/presets/abc/like").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = false)]
async fn concurrent_likes_through_http_are_all_counted(pool: SqlitePool) {
    let app = TestApp::new(pool).await;
    let id = create(&app, "Popular").await;
    let uri = format!("/api/presets/{id}/like");

    let requests = (0..20).map(|_| post_empty(app.router(), &uri));
    let responses = futures::future::join_all(requests).await;
    assert!(responses.iter().all(|r| r.status() == StatusCode::OK));

    let listed = body_json(get(app.router(), "/api/presets").await).await;
    assert_eq!(listed[0]["likes"], 20);
}
