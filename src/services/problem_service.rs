//! Problem service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::ProblemRepository,
    error::{AppError, AppResult},
    handlers::problems::request::CreateProblemRequest,
    judge::{JudgeClient, Language},
    models::Problem,
    services::evaluation_service::{EvaluationService, GradingCase},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a new problem, gated on its reference solutions.
    ///
    /// Every declared reference solution must independently pass all visible
    /// test cases before anything is persisted. The first failing solution
    /// aborts creation with its rejection reason; success persists problem,
    /// test cases, and reference solutions in one transaction, so a failure
    /// anywhere leaves no partial problem record.
    pub async fn create_problem(
        pool: &PgPool,
        judge: &JudgeClient,
        author_id: &Uuid,
        payload: CreateProblemRequest,
    ) -> AppResult<Problem> {
        if payload.visible_test_cases.is_empty() {
            return Err(AppError::Validation(
                "At least one visible test case is required".to_string(),
            ));
        }
        if payload.reference_solutions.is_empty() {
            return Err(AppError::Validation(
                "At least one reference solution is required".to_string(),
            ));
        }

        // Visible cases double as the acceptance gate for the problem's own
        // correctness; hidden cases are reserved for grading learners.
        let gate: Vec<GradingCase> = payload
            .visible_test_cases
            .iter()
            .map(|tc| GradingCase {
                input: tc.input.clone(),
                expected_output: tc.expected_output.clone(),
                explanation: tc.explanation.clone(),
            })
            .collect();

        // Reference solutions run one at a time: each gets its own token
        // set, so results can never be attributed to the wrong solution.
        for (index, solution) in payload.reference_solutions.iter().enumerate() {
            let language = Language::from_name(&solution.language)
                .ok_or_else(|| AppError::UnsupportedLanguage(solution.language.clone()))?;

            let evaluation =
                EvaluationService::execute_batch(judge, &gate, &solution.source_code, language)
                    .await?;

            if !evaluation.accepted {
                let reason = evaluation
                    .tests
                    .iter()
                    .find(|t| !t.status.is_accepted())
                    .map(|t| t.status.to_string())
                    .unwrap_or_else(|| "not all test cases accepted".to_string());

                tracing::warn!(index, reason = %reason, "reference solution rejected");
                return Err(AppError::ReferenceSolutionRejected { index, reason });
            }
        }

        let mut tx = pool.begin().await?;

        let problem = ProblemRepository::create(
            &mut tx,
            &payload.title,
            &payload.description,
            payload.difficulty.as_deref(),
            payload.points,
            &payload.tags.clone().unwrap_or_default(),
            author_id,
        )
        .await?;

        let mut position = 0;
        for tc in &payload.visible_test_cases {
            ProblemRepository::create_test_case(
                &mut tx,
                &problem.id,
                position,
                false,
                &tc.input,
                &tc.expected_output,
                tc.explanation.as_deref(),
            )
            .await?;
            position += 1;
        }
        for tc in &payload.hidden_test_cases {
            ProblemRepository::create_test_case(
                &mut tx,
                &problem.id,
                position,
                true,
                &tc.input,
                &tc.expected_output,
                tc.explanation.as_deref(),
            )
            .await?;
            position += 1;
        }

        for (index, solution) in payload.reference_solutions.iter().enumerate() {
            ProblemRepository::create_reference_solution(
                &mut tx,
                &problem.id,
                index as i32,
                &solution.language,
                &solution.source_code,
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            problem_id = %problem.id,
            test_cases = position,
            reference_solutions = payload.reference_solutions.len(),
            "problem created"
        );

        Ok(problem)
    }
}
