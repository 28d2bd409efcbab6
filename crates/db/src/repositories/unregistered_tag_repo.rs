//! Repository for the `unregistered_tags` ledger.

use sqlx::PgPool;

use crate::models::unregistered::{TagKind, UnregisteredTag};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag_id, kind, recorded_at, expires_at";

/// Bookkeeping for tag scans that failed directory or event lookup.
pub struct UnregisteredTagRepo;

impl UnregisteredTagRepo {
    /// Record an unregistered tag unless a live entry already exists.
    ///
    /// A single conditional write: on conflict with an existing row the
    /// entry is refreshed only if that row has already expired (awaiting
    /// sweep); a live row is left untouched. Returns `true` if a row was
    /// inserted or revived.
    pub async fn record_if_absent(
        pool: &PgPool,
        tag_id: &str,
        kind: TagKind,
        ttl_hours: i32,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO unregistered_tags (tag_id, kind, expires_at)
             VALUES ($1, $2, NOW() + make_interval(hours => $3))
             ON CONFLICT (tag_id, kind) DO UPDATE
                 SET recorded_at = NOW(),
                     expires_at = EXCLUDED.expires_at
                 WHERE unregistered_tags.expires_at <= NOW()",
        )
        .bind(tag_id)
        .bind(kind.as_str())
        .bind(ttl_hours)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find the live ledger entry for a tag, if any. Rows past their
    /// expiry do not count even if the sweep has not removed them yet.
    pub async fn find_live(
        pool: &PgPool,
        tag_id: &str,
        kind: TagKind,
    ) -> Result<Option<UnregisteredTag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unregistered_tags
             WHERE tag_id = $1 AND kind = $2 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UnregisteredTag>(&query)
            .bind(tag_id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List all live ledger entries, oldest first, for operator review.
    pub async fn list_live(pool: &PgPool) -> Result<Vec<UnregisteredTag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM unregistered_tags
             WHERE expires_at > NOW()
             ORDER BY recorded_at"
        );
        sqlx::query_as::<_, UnregisteredTag>(&query).fetch_all(pool).await
    }

    /// Delete entries past their expiry. Returns the count of deleted rows.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM unregistered_tags WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
