//! Problem repository

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Problem, ReferenceSolution, TestCase},
};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// Get a problem's test cases in declaration order.
    ///
    /// `hidden` selects the grading set: hidden cases grade submissions,
    /// visible cases are shown to users and gate reference solutions.
    pub async fn get_test_cases(
        pool: &PgPool,
        problem_id: &Uuid,
        hidden: bool,
    ) -> AppResult<Vec<TestCase>> {
        let test_cases = sqlx::query_as::<_, TestCase>(
            r#"
            SELECT * FROM test_cases
            WHERE problem_id = $1 AND is_hidden = $2
            ORDER BY position
            "#,
        )
        .bind(problem_id)
        .bind(hidden)
        .fetch_all(pool)
        .await?;

        Ok(test_cases)
    }

    /// Insert a problem row (caller provides the transaction)
    pub async fn create(
        conn: &mut PgConnection,
        title: &str,
        description: &str,
        difficulty: Option<&str>,
        points: i32,
        tags: &[String],
        author_id: &Uuid,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, description, difficulty, points, tags, author_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(difficulty)
        .bind(points)
        .bind(tags)
        .bind(author_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(problem)
    }

    /// Insert a test case row (caller provides the transaction)
    pub async fn create_test_case(
        conn: &mut PgConnection,
        problem_id: &Uuid,
        position: i32,
        is_hidden: bool,
        input: &str,
        expected_output: &str,
        explanation: Option<&str>,
    ) -> AppResult<TestCase> {
        let test_case = sqlx::query_as::<_, TestCase>(
            r#"
            INSERT INTO test_cases (problem_id, position, is_hidden, input, expected_output, explanation)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(problem_id)
        .bind(position)
        .bind(is_hidden)
        .bind(input)
        .bind(expected_output)
        .bind(explanation)
        .fetch_one(&mut *conn)
        .await?;

        Ok(test_case)
    }

    /// Insert a reference solution row (caller provides the transaction)
    pub async fn create_reference_solution(
        conn: &mut PgConnection,
        problem_id: &Uuid,
        position: i32,
        language: &str,
        source_code: &str,
    ) -> AppResult<ReferenceSolution> {
        let solution = sqlx::query_as::<_, ReferenceSolution>(
            r#"
            INSERT INTO reference_solutions (problem_id, position, language, source_code)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(problem_id)
        .bind(position)
        .bind(language)
        .bind(source_code)
        .fetch_one(&mut *conn)
        .await?;

        Ok(solution)
    }
}
