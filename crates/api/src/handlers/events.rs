//! Handlers for the `/events` resource: active-event selection and checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use evpass_db::models::unregistered::TagKind;
use evpass_db::repositories::{EventRepo, UnregisteredTagRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body carrying an event's own tag identifier.
#[derive(Debug, Deserialize, Validate)]
pub struct EventTagRequest {
    #[validate(length(min = 1, message = "event_tag_id must not be empty"))]
    pub event_tag_id: String,
}

/// POST /api/v1/events/active
///
/// Resolve the event by its tag and make it the active event. The
/// replacement is unconditional: an unknown tag clears the active event,
/// so a bad operator scan fails loudly on the next attendance request
/// instead of silently attributing scans to a stale event.
pub async fn set_active(
    State(state): State<AppState>,
    Json(payload): Json<EventTagRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let event = EventRepo::find_by_tag(&state.pool, &payload.event_tag_id).await?;
    state.active_event.replace(event).await;

    Ok((StatusCode::OK, "Event tag received successfully").into_response())
}

/// POST /api/v1/events/check
///
/// Query-shaped endpoint with deliberate side effects: resolving the tag
/// also replaces the active event, and a miss is recorded in the
/// unregistered-tag ledger. The reader firmware switches on the literal
/// `EXIST` / `NOT_EXIST` body.
pub async fn check_tag(
    State(state): State<AppState>,
    Json(payload): Json<EventTagRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let event = EventRepo::find_by_tag(&state.pool, &payload.event_tag_id).await?;
    let found = event.is_some();
    state.active_event.replace(event).await;

    if !found {
        let recorded = UnregisteredTagRepo::record_if_absent(
            &state.pool,
            &payload.event_tag_id,
            TagKind::Event,
            state.config.unregistered_tag_ttl_hours,
        )
        .await?;
        if recorded {
            tracing::info!(tag_id = %payload.event_tag_id, "Unregistered event tag recorded");
        }
        return Ok((StatusCode::OK, "NOT_EXIST").into_response());
    }

    Ok((StatusCode::OK, "EXIST").into_response())
}

/// POST /api/v1/events/status
///
/// Report the registration status of an event by tag, `Unknown` when the
/// tag does not resolve. Read-only; does not touch the active event.
pub async fn check_status(
    State(state): State<AppState>,
    Json(payload): Json<EventTagRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let status = EventRepo::find_by_tag(&state.pool, &payload.event_tag_id)
        .await?
        .map(|e| e.reg_status)
        .unwrap_or_else(|| "Unknown".to_string());

    Ok((StatusCode::OK, status).into_response())
}
