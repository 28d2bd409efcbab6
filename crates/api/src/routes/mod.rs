pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                         WebSocket (live scan updates)
///
/// /scan                       raw RFID read (POST)
///
/// /events/active              set active event (POST)
/// /events/check               resolve + set active, ledger on miss (POST)
/// /events/status              registration status by tag (POST)
///
/// /tags/check                 user-tag registration check (POST)
/// /tags/unregistered          live ledger entries (GET)
///
/// /attendance                 combined listing (GET)
/// /attendance/time-in         NONE -> PENDING (POST)
/// /attendance/complete        PENDING -> DONE + record (POST)
/// /attendance/{id}            administrative delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .route("/scan", post(handlers::scan::receive_scan))
        .route("/events/active", post(handlers::events::set_active))
        .route("/events/check", post(handlers::events::check_tag))
        .route("/events/status", post(handlers::events::check_status))
        .route("/tags/check", post(handlers::tags::check_tag))
        .route("/tags/unregistered", get(handlers::tags::list_unregistered))
        .route("/attendance", get(handlers::attendance::list))
        .route("/attendance/time-in", post(handlers::attendance::time_in))
        .route("/attendance/complete", post(handlers::attendance::complete))
        .route("/attendance/{id}", delete(handlers::attendance::delete))
}
