use std::sync::Arc;

use crate::config::ServerConfig;
use crate::context::ActiveEventContext;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: evpass_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Coordinator for the single currently-active event.
    pub active_event: Arc<ActiveEventContext>,
    /// Event bus carrying accepted scans to the WebSocket fan-out task.
    pub event_bus: Arc<evpass_events::EventBus>,
}
