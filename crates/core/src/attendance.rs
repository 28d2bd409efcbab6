//! Attendance session lifecycle.
//!
//! A session for one (user tag, event tag) pair moves through three states:
//!
//! ```text
//! NONE ──time-in──► PENDING ──completion──► DONE
//! ```
//!
//! `PENDING` is a row in `pending_sessions` with status `pending` and no
//! time-out; `DONE` is terminal. The decision functions here are pure so the
//! transition table can be tested without a database; the handlers map their
//! outcomes onto HTTP responses and the repositories enforce the uniqueness
//! side atomically (partial unique index on the pending store).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status marker stored on `pending_sessions` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Timed in, waiting for a time-out.
    Pending,
    /// Promoted by a completion request. Terminal.
    Done,
}

impl SessionStatus {
    /// Database string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Done => "done",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SessionStatus::Pending),
            "done" => Ok(SessionStatus::Done),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown session status: {other}"
            ))),
        }
    }
}

/// Result of evaluating a time-in request against the current state of the
/// (tag, event) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeInOutcome {
    /// No prior record; a pending session should be created.
    Accepted,
    /// A completed attendance record already exists for the pair.
    AlreadyCompleted,
    /// A live pending session already exists for the pair.
    AlreadyPending,
}

impl TimeInOutcome {
    /// Whether the transition was refused.
    pub fn is_conflict(self) -> bool {
        !matches!(self, TimeInOutcome::Accepted)
    }

    /// Plain-text body sent to the reader for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            TimeInOutcome::Accepted => "Time-in recorded",
            TimeInOutcome::AlreadyCompleted => "Attendance already completed for this event",
            TimeInOutcome::AlreadyPending => "Time-in already recorded for this event",
        }
    }
}

/// Decide the time-in transition for a (tag, event) pair.
///
/// `has_completed` and `has_pending` describe the current stored state:
/// whether an attendance record exists and whether a live (`pending`)
/// session exists. A completed record wins over a pending one when both
/// are present.
pub fn decide_time_in(has_completed: bool, has_pending: bool) -> TimeInOutcome {
    if has_completed {
        TimeInOutcome::AlreadyCompleted
    } else if has_pending {
        TimeInOutcome::AlreadyPending
    } else {
        TimeInOutcome::Accepted
    }
}

/// Result of a direct completion request.
///
/// The completion path always records a completed attendance row; the
/// variants only distinguish whether a pending session was promoted to
/// `done` along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// A pending session existed and was promoted in place.
    Promoted,
    /// No pending session existed; only the attendance record was written.
    RecordedWithoutPending,
}

impl CompletionOutcome {
    pub fn from_promoted(promoted: bool) -> Self {
        if promoted {
            CompletionOutcome::Promoted
        } else {
            CompletionOutcome::RecordedWithoutPending
        }
    }

    /// Plain-text body sent to the reader for this outcome.
    ///
    /// Both variants acknowledge success; the reader does not distinguish
    /// them.
    pub fn message(self) -> &'static str {
        "Attendance recorded"
    }
}
