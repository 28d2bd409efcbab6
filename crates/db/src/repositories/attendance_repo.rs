//! Repository for the `attendance_records` (completed) table.

use sqlx::PgPool;

use evpass_core::types::DbId;

use crate::models::session::{AttendanceRecord, NewSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag_id, time_in, time_out, duration, user_id, \
                       first_name, last_name, course, section, student_num, user_type, \
                       event_id, evt_tag_id, evt_title, evt_host_org, created_at";

/// CRUD operations for completed attendance records.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Append a completed attendance record.
    ///
    /// No uniqueness is enforced here: the direct-completion path inserts
    /// unconditionally, whether or not a pending session was promoted.
    pub async fn insert(
        pool: &PgPool,
        input: &NewSession,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance_records
                 (tag_id, time_in, time_out, duration, user_id,
                  first_name, last_name, course, section, student_num, user_type,
                  event_id, evt_tag_id, evt_title, evt_host_org)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query)
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
            .fetch_one(pool)
            .await
    }

    /// Whether a completed record exists for the (tag, event) pair.
    pub async fn exists(
        pool: &PgPool,
        tag_id: &str,
        evt_tag_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM attendance_records
                 WHERE tag_id = $1 AND evt_tag_id = $2
             )",
        )
        .bind(tag_id)
        .bind(evt_tag_id)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    /// List all completed records, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance_records ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AttendanceRecord>(&query).fetch_all(pool).await
    }

    /// Delete a record by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
