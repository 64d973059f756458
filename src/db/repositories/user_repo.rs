//! User repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Record a problem in the user's solved set.
    ///
    /// A single set-semantics statement, not a read-modify-write of the user
    /// record: `ON CONFLICT DO NOTHING` on the (user, problem) key keeps the
    /// operation idempotent under concurrent accepted submissions.
    pub async fn mark_solved(pool: &PgPool, user_id: &Uuid, problem_id: &Uuid) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO solved_problems (user_id, problem_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, problem_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .execute(pool)
        .await?;

        Ok(())
    }
}
