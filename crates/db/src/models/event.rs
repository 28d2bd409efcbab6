//! Event model.

use serde::Serialize;
use sqlx::FromRow;

use evpass_core::types::{DbId, Timestamp};

/// An event row from the `events` table.
///
/// Like users, events carry their own RFID tag: scanning it selects the
/// event as the active context for subsequent attendance scans.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub tag_id: String,
    pub title: String,
    pub host_org: String,
    pub reg_status: String,
    pub created_at: Timestamp,
}

/// DTO for registering an event.
pub struct CreateEvent {
    pub tag_id: String,
    pub title: String,
    pub host_org: String,
    pub reg_status: String,
}
