//! Attendance session models.
//!
//! Sessions are stored two-phase: `pending_sessions` holds time-ins waiting
//! for a time-out (the "not done" store), `attendance_records` holds the
//! completed form. Both carry the same denormalized user and event fields,
//! copied at write time.

use serde::Serialize;
use sqlx::FromRow;

use evpass_core::types::{DbId, Timestamp};

use crate::models::event::Event;
use crate::models::user::User;

/// A row from the `pending_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PendingSession {
    pub id: DbId,
    pub tag_id: String,
    pub time_in: Timestamp,
    pub time_out: Option<Timestamp>,
    pub duration: Option<String>,
    pub status: String,
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub course: Option<String>,
    pub section: Option<String>,
    pub student_num: Option<String>,
    pub user_type: String,
    pub event_id: Option<DbId>,
    pub evt_tag_id: String,
    pub evt_title: String,
    pub evt_host_org: String,
    pub created_at: Timestamp,
}

/// A row from the `attendance_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttendanceRecord {
    pub id: DbId,
    pub tag_id: String,
    pub time_in: Timestamp,
    pub time_out: Option<Timestamp>,
    pub duration: Option<String>,
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub course: Option<String>,
    pub section: Option<String>,
    pub student_num: Option<String>,
    pub user_type: String,
    pub event_id: Option<DbId>,
    pub evt_tag_id: String,
    pub evt_title: String,
    pub evt_host_org: String,
    pub created_at: Timestamp,
}

/// DTO for inserting into either session store.
///
/// `time_out` and `duration` stay `None` on the time-in path; the
/// direct-completion path supplies all four interval fields (duration is
/// computed client-side by the reader and passed through opaquely).
#[derive(Debug, Clone)]
pub struct NewSession {
    pub tag_id: String,
    pub time_in: Timestamp,
    pub time_out: Option<Timestamp>,
    pub duration: Option<String>,
    pub user_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub course: Option<String>,
    pub section: Option<String>,
    pub student_num: Option<String>,
    pub user_type: String,
    pub event_id: Option<DbId>,
    pub evt_tag_id: String,
    pub evt_title: String,
    pub evt_host_org: String,
}

impl NewSession {
    /// Assemble a session DTO from a resolved user and the active event,
    /// denormalizing their descriptive fields.
    pub fn from_scan(
        user: &User,
        event: &Event,
        time_in: Timestamp,
        time_out: Option<Timestamp>,
        duration: Option<String>,
    ) -> Self {
        Self {
            tag_id: user.tag_id.clone(),
            time_in,
            time_out,
            duration,
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            course: user.course.clone(),
            section: user.section.clone(),
            student_num: user.student_num.clone(),
            user_type: user.user_type.clone(),
            event_id: Some(event.id),
            evt_tag_id: event.tag_id.clone(),
            evt_title: event.title.clone(),
            evt_host_org: event.host_org.clone(),
        }
    }
}
