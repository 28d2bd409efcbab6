//! Scan event fan-out.
//!
//! [`ScanBroadcaster`] subscribes to the event bus and forwards each
//! accepted scan as a JSON text frame to every open WebSocket connection.
//! There is no delivery guarantee and no backlog: clients that connect
//! after a scan never see it (beyond the cached last tag id the manager
//! replays on join).

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use evpass_events::ScanEvent;

use crate::ws::WsManager;

/// Forwards scan events from the bus to WebSocket subscribers.
pub struct ScanBroadcaster {
    ws_manager: Arc<WsManager>,
}

impl ScanBroadcaster {
    /// Create a broadcaster over the given WebSocket manager.
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the fan-out loop.
    ///
    /// Consumes events from `receiver` until the channel closes (i.e. the
    /// [`EventBus`](evpass_events::EventBus) is dropped during shutdown).
    pub async fn run(self, mut receiver: broadcast::Receiver<ScanEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.fan_out(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Scan broadcaster lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, scan broadcaster shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and broadcast it to all open connections.
    async fn fan_out(&self, event: &ScanEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, tag_id = %event.tag_id, "Failed to serialize scan event");
                return;
            }
        };

        let count = self.ws_manager.connection_count().await;
        tracing::debug!(tag_id = %event.tag_id, subscribers = count, "Broadcasting scan");
        self.ws_manager.broadcast(Message::Text(payload.into())).await;
    }
}
