use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Manages all active WebSocket connections plus the most recently scanned
/// tag id, which is replayed to newly joined clients.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsSender>>,
    last_tag: RwLock<Option<String>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            last_tag: RwLock::new(None),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink. If a tag has been scanned
    /// since the process started, it is queued as the connection's first
    /// message, the only "replay" a late subscriber gets.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();

        if let Some(tag) = self.last_tag.read().await.clone() {
            let _ = tx.send(Message::Text(tag.into()));
        }

        self.connections.write().await.insert(conn_id, tx);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Record the most recently scanned tag id.
    pub async fn set_last_tag(&self, tag_id: &str) {
        *self.last_tag.write().await = Some(tag_id.to_string());
    }

    /// The most recently scanned tag id, if any scan has arrived.
    pub async fn last_tag(&self) -> Option<String> {
        self.last_tag.read().await.clone()
    }

    /// Broadcast a message to all connected clients.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for sender in conns.values() {
            let _ = sender.send(message.clone());
        }
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for sender in conns.values() {
            let _ = sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for sender in conns.values() {
            let _ = sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
