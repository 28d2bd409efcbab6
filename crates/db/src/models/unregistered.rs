//! Unregistered-tag ledger model.

use serde::Serialize;
use sqlx::FromRow;

use evpass_core::types::{DbId, Timestamp};

/// Which directory a failed lookup was against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// A user tag with no matching directory entry.
    User,
    /// An event tag with no matching event.
    Event,
}

impl TagKind {
    /// Database string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::User => "user",
            TagKind::Event => "event",
        }
    }
}

/// A row from the `unregistered_tags` ledger.
///
/// A row is "live" while `expires_at` is in the future; the background
/// sweep deletes it afterwards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UnregisteredTag {
    pub id: DbId,
    pub tag_id: String,
    pub kind: String,
    pub recorded_at: Timestamp,
    pub expires_at: Timestamp,
}
