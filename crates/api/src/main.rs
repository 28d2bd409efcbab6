use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use evpass_api::background;
use evpass_api::broadcaster::ScanBroadcaster;
use evpass_api::config::ServerConfig;
use evpass_api::context::ActiveEventContext;
use evpass_api::router::build_app_router;
use evpass_api::state::AppState;
use evpass_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evpass_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = evpass_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    evpass_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    evpass_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Active event context ---
    // Process state only: a restart clears it and the operator re-scans
    // the event tag.
    let active_event = Arc::new(ActiveEventContext::new());

    // --- Event bus + scan fan-out ---
    let event_bus = Arc::new(evpass_events::EventBus::default());
    let broadcaster = ScanBroadcaster::new(Arc::clone(&ws_manager));
    let broadcaster_handle = tokio::spawn(broadcaster.run(event_bus.subscribe()));

    // --- Ledger sweep ---
    let sweep_cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(background::ledger_sweep::run(
        pool.clone(),
        Duration::from_secs(config.ledger_sweep_interval_secs),
        sweep_cancel.clone(),
    ));

    tracing::info!("Background services started (scan broadcaster, ledger sweep)");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        active_event,
        event_bus: Arc::clone(&event_bus),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Stop the ledger sweep.
    sweep_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Ledger sweep stopped");

    // Drop the event bus sender to close the broadcast channel.
    // This signals the scan broadcaster to shut down.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), broadcaster_handle).await;
    tracing::info!("Scan broadcaster shut down");

    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing remaining WebSocket connections");
    ws_manager.shutdown_all().await;

    heartbeat_handle.abort();
    tracing::info!("Heartbeat task stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
