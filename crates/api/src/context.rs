//! Active-event coordinator.
//!
//! At most one event is "active" at a time: the event whose own tag was
//! scanned most recently. Attendance scans resolve against it. The context
//! is process state only; it is lost on restart and must be re-established
//! by an operator scanning the event's tag again.

use tokio::sync::RwLock;

use evpass_db::models::event::Event;

/// Holds the currently-active event behind an accessor interface.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// owned by `AppState`. Replacement is last-writer-wins with no versioning:
/// scanning an unknown event tag deliberately clears the context.
pub struct ActiveEventContext {
    current: RwLock<Option<Event>>,
}

impl ActiveEventContext {
    /// Create a context with no active event.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replace the active event unconditionally.
    ///
    /// Passing `None` clears the context; callers do this when an event-tag
    /// scan fails lookup.
    pub async fn replace(&self, event: Option<Event>) {
        let mut current = self.current.write().await;
        match &event {
            Some(e) => tracing::info!(evt_tag_id = %e.tag_id, title = %e.title, "Active event set"),
            None => tracing::info!("Active event cleared"),
        }
        *current = event;
    }

    /// Snapshot of the active event, if any.
    pub async fn current(&self) -> Option<Event> {
        self.current.read().await.clone()
    }
}

impl Default for ActiveEventContext {
    fn default() -> Self {
        Self::new()
    }
}
