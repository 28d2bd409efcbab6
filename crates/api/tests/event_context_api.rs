//! Integration tests for the active-event endpoints and the tag checks.
//!
//! Covers the deliberately side-effecting `/events/check` endpoint (sets
//! the active event, records ledger entries on miss), the last-writer-wins
//! replacement semantics, and the `/tags/check` registration probe.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app_with_state, expect_text, get, post_json};
use serde_json::json;
use sqlx::PgPool;

use evpass_db::models::event::CreateEvent;
use evpass_db::models::unregistered::TagKind;
use evpass_db::models::user::CreateUser;
use evpass_db::repositories::{EventRepo, UnregisteredTagRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_event(tag_id: &str, title: &str) -> CreateEvent {
    CreateEvent {
        tag_id: tag_id.to_string(),
        title: title.to_string(),
        host_org: "CS Society".to_string(),
        reg_status: "Open".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: /events/check with a known tag answers EXIST and sets the context
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_known_event_tag_sets_active_event(pool: PgPool) {
    EventRepo::create(&pool, &new_event("EVT1", "Orientation"))
        .await
        .unwrap();
    let (app, state) = build_test_app_with_state(pool);

    let response = post_json(app, "/api/v1/events/check", json!({ "event_tag_id": "EVT1" })).await;
    let body = expect_text(response, StatusCode::OK).await;
    assert_eq!(body, "EXIST");

    let active = state.active_event.current().await.unwrap();
    assert_eq!(active.tag_id, "EVT1");
    assert_eq!(active.title, "Orientation");
}

// ---------------------------------------------------------------------------
// Test: /events/check with an unknown tag clears the context and records
// the tag in the ledger
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn check_unknown_event_tag_clears_and_records(pool: PgPool) {
    EventRepo::create(&pool, &new_event("EVT1", "Orientation"))
        .await
        .unwrap();
    let (app, state) = build_test_app_with_state(pool.clone());

    // Establish an active event first.
    post_json(
        app.clone(),
        "/api/v1/events/check",
        json!({ "event_tag_id": "EVT1" }),
    )
    .await;
    assert!(state.active_event.current().await.is_some());

    // An unknown tag both answers NOT_EXIST and clears the active event.
    let response = post_json(
        app.clone(),
        "/api/v1/events/check",
        json!({ "event_tag_id": "GHOST" }),
    )
    .await;
    let body = expect_text(response, StatusCode::OK).await;
    assert_eq!(body, "NOT_EXIST");
    assert!(state.active_event.current().await.is_none());

    // The miss landed in the ledger, under the event kind.
    let entry = UnregisteredTagRepo::find_live(&pool, "GHOST", TagKind::Event)
        .await
        .unwrap();
    assert!(entry.is_some());

    // A subsequent time-in hits the missing-event precondition.
    UserRepo::create(
        &pool,
        &CreateUser {
            tag_id: "A1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            course: None,
            section: None,
            student_num: None,
            user_type: "Student".to_string(),
        },
    )
    .await
    .unwrap();
    let response = post_json(
        app,
        "/api/v1/attendance/time-in",
        json!({ "tag_id": "A1", "time_in": "2026-08-30T09:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: /events/active replacement is last-writer-wins
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn set_active_event_last_writer_wins(pool: PgPool) {
    EventRepo::create(&pool, &new_event("EVT1", "Orientation"))
        .await
        .unwrap();
    EventRepo::create(&pool, &new_event("EVT2", "Hackathon"))
        .await
        .unwrap();
    let (app, state) = build_test_app_with_state(pool);

    for tag in ["EVT1", "EVT2"] {
        let response = post_json(
            app.clone(),
            "/api/v1/events/active",
            json!({ "event_tag_id": tag }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(state.active_event.current().await.unwrap().tag_id, "EVT2");
}

// ---------------------------------------------------------------------------
// Test: /events/status reports reg_status, Unknown for missing events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn event_status_reports_reg_status_or_unknown(pool: PgPool) {
    EventRepo::create(&pool, &new_event("EVT1", "Orientation"))
        .await
        .unwrap();
    let (app, _state) = build_test_app_with_state(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/events/status",
        json!({ "event_tag_id": "EVT1" }),
    )
    .await;
    assert_eq!(expect_text(response, StatusCode::OK).await, "Open");

    let response = post_json(
        app,
        "/api/v1/events/status",
        json!({ "event_tag_id": "GHOST" }),
    )
    .await;
    assert_eq!(expect_text(response, StatusCode::OK).await, "Unknown");
}

// ---------------------------------------------------------------------------
// Test: /tags/check reports registration and records unregistered tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn tag_check_records_unregistered_user_tags(pool: PgPool) {
    UserRepo::create(
        &pool,
        &CreateUser {
            tag_id: "A1".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Reyes".to_string(),
            course: None,
            section: None,
            student_num: None,
            user_type: "Student".to_string(),
        },
    )
    .await
    .unwrap();
    let (app, _state) = build_test_app_with_state(pool.clone());

    let response = post_json(app.clone(), "/api/v1/tags/check", json!({ "tag_id": "A1" })).await;
    let json = body_json(response).await;
    assert_eq!(json["registered"], true);

    let response = post_json(
        app.clone(),
        "/api/v1/tags/check",
        json!({ "tag_id": "GHOST" }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["registered"], false);

    let entry = UnregisteredTagRepo::find_live(&pool, "GHOST", TagKind::User)
        .await
        .unwrap();
    assert!(entry.is_some());

    // The review listing exposes the live entry.
    let listing = body_json(get(app, "/api/v1/tags/unregistered").await).await;
    let entries = listing["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["tag_id"], "GHOST");
    assert_eq!(entries[0]["kind"], "user");
}
