//! Submission repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{Submission, SubmissionStatus},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Insert a submission in `pending` status, before dispatch to the judge
    pub async fn create_pending(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: &Uuid,
        language: &str,
        source_code: &str,
        total_test_cases: i32,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, problem_id, language, source_code, status, total_test_cases)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(language)
        .bind(source_code)
        .bind(SubmissionStatus::Pending.as_str())
        .bind(total_test_cases)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Move a pending submission to its terminal status.
    ///
    /// The `status = 'pending'` guard makes the transition exactly-once: a
    /// submission that already carries a terminal status is never rewritten.
    pub async fn finalize(
        pool: &PgPool,
        id: &Uuid,
        status: SubmissionStatus,
        passed_test_cases: i32,
        runtime_ms: f64,
        memory_kb: i64,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET
                status = $2,
                passed_test_cases = $3,
                runtime_ms = $4,
                memory_kb = $5,
                judged_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(passed_test_cases)
        .bind(runtime_ms)
        .bind(memory_kb)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::AlreadyExists("Submission already finalized".to_string()))?;

        Ok(submission)
    }
}
