//! Event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`ScanEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use evpass_db::models::user::User;

/// A tag scan accepted by the reader endpoint.
///
/// Carries the resolved user and a snapshot of the active event's
/// identifying fields at scan time. The event fields are `None` when no
/// event was active; subscribers render that state themselves.
#[derive(Debug, Clone, Serialize)]
pub struct ScanEvent {
    /// The scanned RFID tag identifier.
    pub tag_id: String,

    /// When the scan arrived (UTC).
    pub timestamp: DateTime<Utc>,

    /// Reader-supplied scan kind, e.g. `"time-in"` or `"time-out"`.
    pub time_type: String,

    /// The resolved directory entry for the tag.
    pub user: User,

    /// Active event's tag identifier, if an event was active.
    pub evt_tag_id: Option<String>,

    /// Active event's title.
    pub evt_title: Option<String>,

    /// Active event's hosting organization.
    pub evt_host_org: Option<String>,
}

/// Deserializable mirror of [`ScanEvent`] for subscribers that consume the
/// JSON wire form (tests, external tooling).
#[derive(Debug, Clone, Deserialize)]
pub struct ScanEventWire {
    pub tag_id: String,
    pub timestamp: DateTime<Utc>,
    pub time_type: String,
    pub evt_tag_id: Option<String>,
    pub evt_title: Option<String>,
    pub evt_host_org: Option<String>,
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ScanEvent`].
pub struct EventBus {
    sender: broadcast::Sender<ScanEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// there is no delivery guarantee or replay.
    pub fn publish(&self, event: ScanEvent) {
        // A SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
