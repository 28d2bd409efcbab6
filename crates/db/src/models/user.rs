//! User directory model.

use serde::Serialize;
use sqlx::FromRow;

use evpass_core::types::{DbId, Timestamp};

/// A user row from the `users` table, keyed by the RFID tag credential.
///
/// Immutable from the attendance lifecycle's point of view; the lifecycle
/// only reads it to denormalize descriptive fields into session rows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub tag_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course: Option<String>,
    pub section: Option<String>,
    pub student_num: Option<String>,
    pub user_type: String,
    pub created_at: Timestamp,
}

/// DTO for registering a user in the directory.
pub struct CreateUser {
    pub tag_id: String,
    pub first_name: String,
    pub last_name: String,
    pub course: Option<String>,
    pub section: Option<String>,
    pub student_num: Option<String>,
    pub user_type: String,
}
