//! Repository for the `users` table (the tag directory).

use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tag_id, first_name, last_name, course, section, \
                       student_num, user_type, created_at";

/// Provides lookups against the user directory.
pub struct UserRepo;

impl UserRepo {
    /// Register a user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (tag_id, first_name, last_name, course, section, student_num, user_type)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.tag_id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.course)
            .bind(&input.section)
            .bind(&input.student_num)
            .bind(&input.user_type)
            .fetch_one(pool)
            .await
    }

    /// Exact-match lookup by tag identifier. No normalization; absence is
    /// not an error (callers treat it as "unregistered tag").
    pub async fn find_by_tag(pool: &PgPool, tag_id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE tag_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(tag_id)
            .fetch_optional(pool)
            .await
    }
}
