//! Handlers for the `/tags` resource: user-tag registration checks and the
//! unregistered-tag ledger review listing.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use evpass_db::models::unregistered::{TagKind, UnregisteredTag};
use evpass_db::repositories::{UnregisteredTagRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body carrying a user tag identifier.
#[derive(Debug, Deserialize, Validate)]
pub struct TagCheckRequest {
    #[validate(length(min = 1, message = "tag_id must not be empty"))]
    pub tag_id: String,
}

/// Response body for a tag registration check.
#[derive(Debug, Serialize)]
pub struct TagCheckResponse {
    pub registered: bool,
}

/// POST /api/v1/tags/check
///
/// Report whether a tag resolves against the user directory. A miss is
/// recorded in the unregistered-tag ledger so the operator can register
/// the credential later.
pub async fn check_tag(
    State(state): State<AppState>,
    Json(payload): Json<TagCheckRequest>,
) -> AppResult<Json<TagCheckResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let registered = UserRepo::find_by_tag(&state.pool, &payload.tag_id)
        .await?
        .is_some();

    if !registered {
        let recorded = UnregisteredTagRepo::record_if_absent(
            &state.pool,
            &payload.tag_id,
            TagKind::User,
            state.config.unregistered_tag_ttl_hours,
        )
        .await?;
        if recorded {
            tracing::info!(tag_id = %payload.tag_id, "Unregistered user tag recorded");
        }
    }

    Ok(Json(TagCheckResponse { registered }))
}

/// GET /api/v1/tags/unregistered
///
/// List live ledger entries for operator review. Expired rows are excluded
/// even if the sweep has not removed them yet.
pub async fn list_unregistered(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UnregisteredTag>>>> {
    let entries = UnregisteredTagRepo::list_live(&state.pool).await?;
    Ok(Json(DataResponse { data: entries }))
}
