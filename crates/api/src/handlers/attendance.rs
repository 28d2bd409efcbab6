//! Handlers for the `/attendance` resource: the session lifecycle endpoints.
//!
//! Time-in creates a pending session; direct completion promotes the
//! pending session (if one exists) and appends a completed record; delete
//! removes a completed record together with any pending row sharing its id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use evpass_core::attendance::{decide_time_in, CompletionOutcome, TimeInOutcome};
use evpass_core::error::CoreError;
use evpass_core::types::{DbId, Timestamp};
use evpass_db::models::event::Event;
use evpass_db::models::session::{AttendanceRecord, NewSession, PendingSession};
use evpass_db::models::user::User;
use evpass_db::repositories::{AttendanceRepo, PendingSessionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for a time-in.
///
/// `time_out` and `duration` are normally absent; some readers send them
/// pre-filled and they are stored as-is on the pending row.
#[derive(Debug, Deserialize, Validate)]
pub struct TimeInRequest {
    #[validate(length(min = 1, message = "tag_id must not be empty"))]
    pub tag_id: String,
    pub time_in: Timestamp,
    pub time_out: Option<Timestamp>,
    pub duration: Option<String>,
}

/// Request body for a direct completion: the reader computed the full
/// interval client-side.
#[derive(Debug, Deserialize, Validate)]
pub struct CompletionRequest {
    #[validate(length(min = 1, message = "tag_id must not be empty"))]
    pub tag_id: String,
    pub time_in: Timestamp,
    pub time_out: Timestamp,
    pub duration: String,
}

/// Combined listing of completed records and open pending sessions.
#[derive(Debug, Serialize)]
pub struct AttendanceListing {
    pub records: Vec<AttendanceRecord>,
    pub pending: Vec<PendingSession>,
}

/// POST /api/v1/attendance/time-in
///
/// `NONE -> PENDING` transition for the (tag, active event) pair. Refused
/// when a completed record or a live pending session already exists.
pub async fn time_in(
    State(state): State<AppState>,
    Json(payload): Json<TimeInRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (user, event) = match resolve_scan_context(&state, &payload.tag_id).await? {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    let has_completed = AttendanceRepo::exists(&state.pool, &user.tag_id, &event.tag_id).await?;
    let has_pending = PendingSessionRepo::find_live(&state.pool, &user.tag_id, &event.tag_id)
        .await?
        .is_some();

    let outcome = decide_time_in(has_completed, has_pending);
    if outcome.is_conflict() {
        return Ok(refused(outcome));
    }

    let input = NewSession::from_scan(
        &user,
        &event,
        payload.time_in,
        payload.time_out,
        payload.duration,
    );

    // The lookups above are advisory; the partial unique index on the
    // pending store makes this insert the authoritative duplicate gate
    // under concurrent scans of the same tag.
    match PendingSessionRepo::create_if_absent(&state.pool, &input).await? {
        Some(session) => {
            tracing::info!(
                tag_id = %session.tag_id,
                evt_tag_id = %session.evt_tag_id,
                "Pending session created"
            );
            Ok((StatusCode::OK, TimeInOutcome::Accepted.message()).into_response())
        }
        None => Ok(refused(TimeInOutcome::AlreadyPending)),
    }
}

/// POST /api/v1/attendance/complete
///
/// `PENDING -> DONE` transition plus the unconditional completed-record
/// insert: the pending session (when one exists) is promoted in place, and
/// a new attendance record is appended either way.
pub async fn complete(
    State(state): State<AppState>,
    Json(payload): Json<CompletionRequest>,
) -> AppResult<Response> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (user, event) = match resolve_scan_context(&state, &payload.tag_id).await? {
        Ok(pair) => pair,
        Err(response) => return Ok(response),
    };

    let promoted = PendingSessionRepo::complete(
        &state.pool,
        &user.tag_id,
        &event.tag_id,
        Some(payload.time_out),
        Some(&payload.duration),
    )
    .await?;

    let input = NewSession::from_scan(
        &user,
        &event,
        payload.time_in,
        Some(payload.time_out),
        Some(payload.duration.clone()),
    );
    let record = AttendanceRepo::insert(&state.pool, &input).await?;

    let outcome = CompletionOutcome::from_promoted(promoted);
    tracing::info!(
        tag_id = %record.tag_id,
        evt_tag_id = %record.evt_tag_id,
        record_id = record.id,
        promoted,
        "Attendance completed"
    );

    Ok((StatusCode::OK, outcome.message()).into_response())
}

/// GET /api/v1/attendance
///
/// All completed records plus pending sessions not yet promoted to `done`.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<AttendanceListing>>> {
    let records = AttendanceRepo::list(&state.pool).await?;
    let pending = PendingSessionRepo::list_open(&state.pool).await?;
    Ok(Json(DataResponse {
        data: AttendanceListing { records, pending },
    }))
}

/// DELETE /api/v1/attendance/{id}
///
/// Administrative delete: removes the completed record and any pending
/// session sharing the same id, as one logical delete. 404 when no
/// completed record exists; a pending row alone is not addressable here.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let pending_removed = PendingSessionRepo::delete(&state.pool, id).await?;
    if pending_removed {
        tracing::info!(id, "Pending session removed with attendance record");
    }

    let deleted = AttendanceRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "AttendanceRecord",
            id,
        }))
    }
}

// ── Private helpers ──────────────────────────────────────────────────────

/// Resolve the scanned tag and the active event, producing the early plain-
/// text responses the lifecycle preconditions call for: an unknown user is
/// benign (200), a missing active event is a 400.
async fn resolve_scan_context(
    state: &AppState,
    tag_id: &str,
) -> Result<Result<(User, Event), Response>, AppError> {
    let Some(user) = UserRepo::find_by_tag(&state.pool, tag_id).await? else {
        tracing::info!(tag_id = %tag_id, "Attendance request for unregistered tag");
        return Ok(Err((StatusCode::OK, "User not found").into_response()));
    };

    let Some(event) = state.active_event.current().await else {
        tracing::warn!(tag_id = %tag_id, "Attendance request with no active event");
        return Ok(Err(
            (StatusCode::BAD_REQUEST, "Event information not available").into_response(),
        ));
    };

    Ok(Ok((user, event)))
}

/// 400 plain-text response for a refused time-in transition.
fn refused(outcome: TimeInOutcome) -> Response {
    (StatusCode::BAD_REQUEST, outcome.message()).into_response()
}
