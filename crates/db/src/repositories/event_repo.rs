//! Repository for the `events` table.

use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag_id, title, host_org, reg_status, created_at";

/// Provides lookups against the event store.
pub struct EventRepo;

impl EventRepo {
    /// Register an event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (tag_id, title, host_org, reg_status)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.tag_id)
            .bind(&input.title)
            .bind(&input.host_org)
            .bind(&input.reg_status)
            .fetch_one(pool)
            .await
    }

    /// Exact-match lookup by the event's own tag identifier.
    pub async fn find_by_tag(pool: &PgPool, tag_id: &str) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE tag_id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(tag_id)
            .fetch_optional(pool)
            .await
    }
}
