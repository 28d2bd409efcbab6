//! Integration tests for the `/scan` endpoint and its fan-out side effects.

mod common;

use axum::http::StatusCode;
use common::{build_test_app_with_state, expect_text, post_json};
use serde_json::json;
use sqlx::PgPool;

use evpass_db::models::event::CreateEvent;
use evpass_db::models::user::CreateUser;
use evpass_db::repositories::{EventRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn seed_user(tag_id: &str) -> CreateUser {
    CreateUser {
        tag_id: tag_id.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Reyes".to_string(),
        course: Some("BSIT".to_string()),
        section: Some("3B".to_string()),
        student_num: Some("2021-00123".to_string()),
        user_type: "Student".to_string(),
    }
}

fn scan_body(tag_id: &str) -> serde_json::Value {
    json!({ "tag_id": tag_id, "time_type": "time-in" })
}

// ---------------------------------------------------------------------------
// Test: scan of a registered tag publishes an event on the bus
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scan_publishes_event_with_active_event_fields(pool: PgPool) {
    UserRepo::create(&pool, &seed_user("A1")).await.unwrap();
    EventRepo::create(
        &pool,
        &CreateEvent {
            tag_id: "EVT1".to_string(),
            title: "Orientation".to_string(),
            host_org: "CS Society".to_string(),
            reg_status: "Open".to_string(),
        },
    )
    .await
    .unwrap();
    let (app, state) = build_test_app_with_state(pool);

    post_json(
        app.clone(),
        "/api/v1/events/active",
        json!({ "event_tag_id": "EVT1" }),
    )
    .await;

    // Subscribe before the scan: the bus has no replay.
    let mut rx = state.event_bus.subscribe();

    let response = post_json(app, "/api/v1/scan", scan_body("A1")).await;
    let body = expect_text(response, StatusCode::OK).await;
    assert_eq!(body, "RFID data received successfully");

    let event = rx.recv().await.unwrap();
    assert_eq!(event.tag_id, "A1");
    assert_eq!(event.time_type, "time-in");
    assert_eq!(event.user.first_name, "Ana");
    assert_eq!(event.evt_tag_id.as_deref(), Some("EVT1"));
    assert_eq!(event.evt_title.as_deref(), Some("Orientation"));

    // The manager cached the tag for late WebSocket joiners.
    assert_eq!(state.ws_manager.last_tag().await.as_deref(), Some("A1"));
}

// ---------------------------------------------------------------------------
// Test: scan with no active event carries null event fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scan_without_active_event_has_null_event_fields(pool: PgPool) {
    UserRepo::create(&pool, &seed_user("A1")).await.unwrap();
    let (app, state) = build_test_app_with_state(pool);

    let mut rx = state.event_bus.subscribe();
    post_json(app, "/api/v1/scan", scan_body("A1")).await;

    let event = rx.recv().await.unwrap();
    assert!(event.evt_tag_id.is_none());
    assert!(event.evt_title.is_none());
    assert!(event.evt_host_org.is_none());
}

// ---------------------------------------------------------------------------
// Test: scan of an unknown tag is benign, caches the tag, broadcasts nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn scan_unknown_tag_caches_but_does_not_publish(pool: PgPool) {
    let (app, state) = build_test_app_with_state(pool);

    let mut rx = state.event_bus.subscribe();

    let response = post_json(app, "/api/v1/scan", scan_body("GHOST")).await;
    let body = expect_text(response, StatusCode::OK).await;
    assert_eq!(body, "User not found");

    // The tag is cached before lookup, so the operator display still
    // shows what was scanned.
    assert_eq!(state.ws_manager.last_tag().await.as_deref(), Some("GHOST"));

    // Nothing was published for the unresolved tag.
    assert!(rx.try_recv().is_err());
}
