//! Periodic sweep of the unregistered-tag ledger.
//!
//! Ledger rows carry a durable `expires_at` timestamp; this task deletes
//! rows past it on a fixed interval, so expiry survives process restarts.

use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use evpass_db::repositories::UnregisteredTagRepo;

/// Run the ledger sweep loop.
///
/// Deletes expired `unregistered_tags` rows every `interval`. Runs until
/// `cancel` is triggered.
pub async fn run(pool: PgPool, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Ledger sweep started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ledger sweep stopping");
                break;
            }
            _ = ticker.tick() => {
                match UnregisteredTagRepo::delete_expired(&pool).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Ledger sweep: purged expired tags");
                        } else {
                            tracing::debug!("Ledger sweep: nothing to purge");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Ledger sweep failed");
                    }
                }
            }
        }
    }
}
