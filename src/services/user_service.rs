//! User service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::repositories::UserRepository, error::AppResult};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Record that a user has fully solved a problem.
    ///
    /// The evaluation path is the only writer of this relationship. Safe
    /// under repeated calls: solving the same problem twice leaves exactly
    /// one entry in the solved set.
    pub async fn mark_problem_solved(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: &Uuid,
    ) -> AppResult<()> {
        UserRepository::mark_solved(pool, user_id, problem_id).await?;
        tracing::info!(user_id = %user_id, problem_id = %problem_id, "problem marked solved");
        Ok(())
    }
}
