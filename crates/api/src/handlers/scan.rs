//! Handler for the `/scan` endpoint: raw RFID reads from the reader.
//!
//! A scan does not touch the session stores; it resolves the tag, caches it
//! as the latest-seen tag, and publishes a [`ScanEvent`] for the WebSocket
//! fan-out. Attendance bookkeeping happens through the `/attendance`
//! endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use evpass_db::repositories::UserRepo;
use evpass_events::ScanEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for an incoming RFID read.
#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    /// The scanned tag identifier.
    #[validate(length(min = 1, message = "tag_id must not be empty"))]
    pub tag_id: String,
    /// Reader-supplied scan kind, e.g. `"time-in"` or `"time-out"`.
    #[validate(length(min = 1, message = "time_type must not be empty"))]
    pub time_type: String,
}

/// POST /api/v1/scan
///
/// Resolve the tag against the directory and broadcast the scan to all
/// connected live-update clients. An unknown tag gets a benign plain-text
/// response, not an error, since the reader shows the body to the operator.
pub async fn receive_scan(
    State(state): State<AppState>,
    Json(payload): Json<ScanRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let timestamp = chrono::Utc::now();

    // Cache before lookup: the latest tag is replayed to newly joined
    // WebSocket clients whether or not the tag resolves.
    state.ws_manager.set_last_tag(&payload.tag_id).await;

    let Some(user) = UserRepo::find_by_tag(&state.pool, &payload.tag_id).await? else {
        tracing::info!(tag_id = %payload.tag_id, "Scan from unregistered tag");
        return Ok((StatusCode::OK, "User not found").into_response());
    };

    tracing::info!(
        tag_id = %payload.tag_id,
        time_type = %payload.time_type,
        user = %format!("{} {}", user.first_name, user.last_name),
        "RFID scan received"
    );

    let active = state.active_event.current().await;
    state.event_bus.publish(ScanEvent {
        tag_id: payload.tag_id,
        timestamp,
        time_type: payload.time_type,
        user,
        evt_tag_id: active.as_ref().map(|e| e.tag_id.clone()),
        evt_title: active.as_ref().map(|e| e.title.clone()),
        evt_host_org: active.as_ref().map(|e| e.host_org.clone()),
    });

    Ok((StatusCode::OK, "RFID data received successfully").into_response())
}
