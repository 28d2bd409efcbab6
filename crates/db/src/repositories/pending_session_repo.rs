//! Repository for the `pending_sessions` ("not done") table.

use sqlx::PgPool;

use evpass_core::types::{DbId, Timestamp};

use crate::models::session::{NewSession, PendingSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag_id, time_in, time_out, duration, status, user_id, \
                       first_name, last_name, course, section, student_num, user_type, \
                       event_id, evt_tag_id, evt_title, evt_host_org, created_at";

/// CRUD operations for pending attendance sessions.
pub struct PendingSessionRepo;

impl PendingSessionRepo {
    /// Insert a pending session unless a live one already exists for the
    /// (tag, event) pair.
    ///
    /// The `ON CONFLICT` clause targets the partial unique index on
    /// `(tag_id, evt_tag_id) WHERE status = 'pending'`, so the existence
    /// check and the insert are a single atomic statement. Returns the
    /// created row, or `None` when a live session already held the slot.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &NewSession,
    ) -> Result<Option<PendingSession>, sqlx::Error> {
        let query = format!(
            "INSERT INTO pending_sessions
                 (tag_id, time_in, time_out, duration, user_id,
                  first_name, last_name, course, section, student_num, user_type,
                  event_id, evt_tag_id, evt_title, evt_host_org)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT (tag_id, evt_tag_id) WHERE status = 'pending' DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PendingSession>(&query)
            .bind(&input.tag_id)
            .bind(input.time_in)
            .bind(input.time_out)
            .bind(&input.duration)
            .bind(input.user_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.course)
            .bind(&input.section)
            .bind(&input.student_num)
            .bind(&input.user_type)
            .bind(input.event_id)
            .bind(&input.evt_tag_id)
            .bind(&input.evt_title)
            .bind(&input.evt_host_org)
            .fetch_optional(pool)
            .await
    }

    /// Find the live (`pending`) session for a (tag, event) pair, if any.
    pub async fn find_live(
        pool: &PgPool,
        tag_id: &str,
        evt_tag_id: &str,
    ) -> Result<Option<PendingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pending_sessions
             WHERE tag_id = $1 AND evt_tag_id = $2 AND status = 'pending'"
        );
        sqlx::query_as::<_, PendingSession>(&query)
            .bind(tag_id)
            .bind(evt_tag_id)
            .fetch_optional(pool)
            .await
    }

    /// Promote the live session for a (tag, event) pair to `done`, setting
    /// its time-out and duration in place. Returns `true` if a row was
    /// updated.
    pub async fn complete(
        pool: &PgPool,
        tag_id: &str,
        evt_tag_id: &str,
        time_out: Option<Timestamp>,
        duration: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE pending_sessions
             SET status = 'done', time_out = $3, duration = $4
             WHERE tag_id = $1 AND evt_tag_id = $2 AND status = 'pending'",
        )
        .bind(tag_id)
        .bind(evt_tag_id)
        .bind(time_out)
        .bind(duration)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List sessions that have not been promoted to `done`.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<PendingSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pending_sessions
             WHERE status <> 'done'
             ORDER BY time_in"
        );
        sqlx::query_as::<_, PendingSession>(&query).fetch_all(pool).await
    }

    /// Delete a session by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pending_sessions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
