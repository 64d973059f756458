//! Evaluation orchestrator
//!
//! Builds a judge batch from a problem's test cases and a candidate source,
//! dispatches it, and reduces the per-test results into one verdict plus
//! aggregate metrics. Submit mode additionally writes the submission ledger
//! and the solved set; run mode performs the identical evaluation with no
//! persistence at all.

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProblemRepository, SubmissionRepository},
    error::{AppError, AppResult},
    judge::{BatchItem, JudgeClient, JudgeResult, JudgeStatus, Language},
    models::{SubmissionStatus, TestCase},
    services::UserService,
};

/// How an evaluation's outcome is committed
#[derive(Debug, Clone, Copy)]
pub enum EvaluationMode {
    /// Ephemeral: nothing is persisted
    Run,
    /// Persisted: the submission ledger is written and, on full acceptance,
    /// the user's solved set is updated
    Submit { user_id: Uuid },
}

/// The slice of a test case the pipeline needs: what to feed the program
/// and what to expect back. Built either from stored test cases or, at
/// problem creation time, from the not-yet-persisted payload.
#[derive(Debug, Clone)]
pub struct GradingCase {
    pub input: String,
    pub expected_output: String,
    pub explanation: Option<String>,
}

impl From<&TestCase> for GradingCase {
    fn from(tc: &TestCase) -> Self {
        Self {
            input: tc.input.clone(),
            expected_output: tc.expected_output.clone(),
            explanation: tc.explanation.clone(),
        }
    }
}

/// Outcome of one evaluation across all its test cases
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// True only if every test case's status is accepted
    pub accepted: bool,
    pub total_test_cases: i32,
    pub passed_test_cases: i32,
    /// Sum of per-test runtimes in milliseconds (total compute consumed)
    pub runtime_ms: f64,
    /// Maximum per-test memory in kilobytes (peak footprint)
    pub memory_kb: i64,
    pub tests: Vec<TestEvaluation>,
}

/// Per-test detail preserved alongside the coarse verdict
#[derive(Debug, Clone)]
pub struct TestEvaluation {
    pub stdin: String,
    pub expected_output: String,
    pub stdout: Option<String>,
    pub status: JudgeStatus,
    pub runtime_ms: f64,
    pub memory_kb: i64,
    pub error: Option<String>,
    pub explanation: Option<String>,
}

/// Evaluation service for business logic
pub struct EvaluationService;

impl EvaluationService {
    /// Evaluate a candidate source against a problem's grading set.
    ///
    /// Run mode samples against the visible test cases; submit mode grades
    /// against the hidden ones and commits the outcome.
    pub async fn evaluate(
        pool: &PgPool,
        judge: &JudgeClient,
        problem_id: &Uuid,
        source_code: &str,
        language_name: &str,
        mode: EvaluationMode,
    ) -> AppResult<Evaluation> {
        let language = Language::from_name(language_name)
            .ok_or_else(|| AppError::UnsupportedLanguage(language_name.to_string()))?;

        let problem = ProblemRepository::find_by_id(pool, problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let hidden = matches!(mode, EvaluationMode::Submit { .. });
        let test_cases = ProblemRepository::get_test_cases(pool, &problem.id, hidden).await?;
        if test_cases.is_empty() {
            return Err(AppError::Validation(
                "Problem has no test cases to evaluate against".to_string(),
            ));
        }
        let cases: Vec<GradingCase> = test_cases.iter().map(GradingCase::from).collect();

        match mode {
            EvaluationMode::Run => Self::execute_batch(judge, &cases, source_code, language).await,
            EvaluationMode::Submit { user_id } => {
                let submission = SubmissionRepository::create_pending(
                    pool,
                    &user_id,
                    &problem.id,
                    language.as_str(),
                    source_code,
                    cases.len() as i32,
                )
                .await?;

                let evaluation =
                    match Self::execute_batch(judge, &cases, source_code, language).await {
                        Ok(evaluation) => evaluation,
                        Err(err) => {
                            // Judging never produced a verdict: close out the
                            // pending record so nothing stays mid-flight, then
                            // surface the failure.
                            if let Err(finalize_err) = SubmissionRepository::finalize(
                                pool,
                                &submission.id,
                                SubmissionStatus::Failed,
                                0,
                                0.0,
                                0,
                            )
                            .await
                            {
                                tracing::error!(
                                    submission_id = %submission.id,
                                    error = %finalize_err,
                                    "could not finalize submission after judge failure"
                                );
                            }
                            return Err(err);
                        }
                    };

                let status = if evaluation.accepted {
                    SubmissionStatus::Accepted
                } else {
                    SubmissionStatus::Failed
                };
                SubmissionRepository::finalize(
                    pool,
                    &submission.id,
                    status,
                    evaluation.passed_test_cases,
                    evaluation.runtime_ms,
                    evaluation.memory_kb,
                )
                .await?;

                if evaluation.accepted {
                    UserService::mark_problem_solved(pool, &user_id, &problem.id).await?;
                }

                tracing::info!(
                    submission_id = %submission.id,
                    status = %status,
                    passed = evaluation.passed_test_cases,
                    total = evaluation.total_test_cases,
                    "submission judged"
                );

                Ok(evaluation)
            }
        }
    }

    /// Dispatch one batch and reduce its results. No persistence; also used
    /// by the problem validator against not-yet-persisted test cases.
    pub(crate) async fn execute_batch(
        judge: &JudgeClient,
        cases: &[GradingCase],
        source_code: &str,
        language: Language,
    ) -> AppResult<Evaluation> {
        let items: Vec<BatchItem> = cases
            .iter()
            .map(|case| BatchItem {
                source_code: source_code.to_string(),
                language_id: language.service_id(),
                stdin: case.input.clone(),
                expected_output: case.expected_output.clone(),
            })
            .collect();

        let tokens = judge.submit_batch(&items).await?;
        let results = judge.await_results(&tokens).await?;

        Ok(Self::reduce(cases, results))
    }

    /// Reduce per-test judge results into one verdict plus aggregates.
    ///
    /// Pure function of its inputs. Runtime is summed while memory is maxed:
    /// total compute consumed versus peak resource footprint.
    pub fn reduce(cases: &[GradingCase], results: Vec<JudgeResult>) -> Evaluation {
        debug_assert_eq!(cases.len(), results.len());

        let total_test_cases = cases.len() as i32;
        let mut passed_test_cases = 0;
        let mut runtime_ms = 0.0;
        let mut memory_kb = 0;

        let tests: Vec<TestEvaluation> = cases
            .iter()
            .zip(results)
            .map(|(case, result)| {
                if result.status.is_accepted() {
                    passed_test_cases += 1;
                }
                runtime_ms += result.time_ms;
                memory_kb = memory_kb.max(result.memory_kb);

                let error = result.error_output().map(String::from);
                TestEvaluation {
                    stdin: case.input.clone(),
                    expected_output: case.expected_output.clone(),
                    stdout: result.stdout,
                    status: result.status,
                    runtime_ms: result.time_ms,
                    memory_kb: result.memory_kb,
                    error,
                    explanation: case.explanation.clone(),
                }
            })
            .collect();

        Evaluation {
            accepted: passed_test_cases == total_test_cases,
            total_test_cases,
            passed_test_cases,
            runtime_ms,
            memory_kb,
            tests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::client::MockJudgeBackend;
    use crate::judge::{Clock, PollPolicy};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn case(input: &str, expected: &str) -> GradingCase {
        GradingCase {
            input: input.to_string(),
            expected_output: expected.to_string(),
            explanation: None,
        }
    }

    fn result(status: JudgeStatus, time_ms: f64, memory_kb: i64) -> JudgeResult {
        JudgeResult {
            status,
            time_ms,
            memory_kb,
            stdout: Some("out".to_string()),
            stderr: None,
            compile_output: None,
        }
    }

    #[test]
    fn test_all_accepted_reduces_to_accepted() {
        let cases = vec![case("1", "1"), case("2", "2"), case("3", "3")];
        let results = vec![
            result(JudgeStatus::Accepted, 10.0, 100),
            result(JudgeStatus::Accepted, 20.0, 300),
            result(JudgeStatus::Accepted, 30.0, 200),
        ];

        let evaluation = EvaluationService::reduce(&cases, results);

        assert!(evaluation.accepted);
        assert_eq!(evaluation.total_test_cases, 3);
        assert_eq!(evaluation.passed_test_cases, 3);
        // Runtime is summed, memory is maxed
        assert_eq!(evaluation.runtime_ms, 60.0);
        assert_eq!(evaluation.memory_kb, 300);
    }

    #[test]
    fn test_one_wrong_answer_folds_to_failed() {
        let cases = vec![case("1", "1"), case("2", "2"), case("3", "3")];
        let results = vec![
            result(JudgeStatus::Accepted, 10.0, 100),
            result(JudgeStatus::WrongAnswer, 20.0, 100),
            result(JudgeStatus::Accepted, 30.0, 100),
        ];

        let evaluation = EvaluationService::reduce(&cases, results);

        assert!(!evaluation.accepted);
        assert_eq!(evaluation.passed_test_cases, 2);
        // The failing test keeps its specific status code
        assert_eq!(evaluation.tests[1].status.id(), 4);
        assert_eq!(evaluation.tests[0].status.id(), 3);
    }

    #[test]
    fn test_every_failure_kind_counts_the_same_at_the_top() {
        let cases = vec![case("1", "1"); 4];
        for failing in [
            JudgeStatus::WrongAnswer,
            JudgeStatus::TimeLimitExceeded,
            JudgeStatus::CompilationError,
            JudgeStatus::RuntimeError(11),
        ] {
            let results = vec![
                result(JudgeStatus::Accepted, 1.0, 1),
                result(failing, 1.0, 1),
                result(JudgeStatus::Accepted, 1.0, 1),
                result(JudgeStatus::Accepted, 1.0, 1),
            ];
            let evaluation = EvaluationService::reduce(&cases, results);
            assert!(!evaluation.accepted);
            assert_eq!(evaluation.passed_test_cases, 3);
        }
    }

    #[test]
    fn test_single_test_aggregates_equal_that_test() {
        let cases = vec![case("5", "25")];
        let results = vec![result(JudgeStatus::Accepted, 42.0, 512)];

        let evaluation = EvaluationService::reduce(&cases, results);

        assert!(evaluation.accepted);
        assert_eq!(evaluation.runtime_ms, 42.0);
        assert_eq!(evaluation.memory_kb, 512);
    }

    #[test]
    fn test_detail_carries_inputs_and_error_text() {
        let cases = vec![GradingCase {
            input: "in".to_string(),
            expected_output: "expected".to_string(),
            explanation: Some("why".to_string()),
        }];
        let results = vec![JudgeResult {
            status: JudgeStatus::CompilationError,
            time_ms: 0.0,
            memory_kb: 0,
            stdout: None,
            stderr: None,
            compile_output: Some("expected ';'".to_string()),
        }];

        let evaluation = EvaluationService::reduce(&cases, results);

        let test = &evaluation.tests[0];
        assert_eq!(test.stdin, "in");
        assert_eq!(test.expected_output, "expected");
        assert_eq!(test.error.as_deref(), Some("expected ';'"));
        assert_eq!(test.explanation.as_deref(), Some("why"));
    }

    /// Clock whose sleeps complete immediately
    struct InstantClock;

    #[async_trait]
    impl Clock for InstantClock {
        fn now(&self) -> Instant {
            Instant::now()
        }

        async fn sleep(&self, _duration: Duration) {}
    }

    #[tokio::test]
    async fn test_execute_batch_pairs_results_with_cases() {
        let cases = vec![case("1", "one"), case("2", "two")];

        let mut backend = MockJudgeBackend::new();
        backend.expect_create_batch().times(1).returning(|items| {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].stdin, "1");
            assert_eq!(items[1].stdin, "2");
            Ok(vec!["t1".to_string(), "t2".to_string()])
        });
        backend.expect_fetch_batch().times(1).returning(|_| {
            Ok(vec![
                result(JudgeStatus::Accepted, 5.0, 64),
                result(JudgeStatus::WrongAnswer, 7.0, 32),
            ])
        });

        let judge = JudgeClient::new(
            Arc::new(backend),
            Arc::new(InstantClock),
            PollPolicy {
                deadline: Duration::from_secs(5),
                initial_interval: Duration::from_millis(10),
                max_interval: Duration::from_millis(100),
            },
        );

        let evaluation =
            EvaluationService::execute_batch(&judge, &cases, "print(input())", Language::Python)
                .await
                .unwrap();

        assert_eq!(evaluation.tests.len(), 2);
        assert_eq!(evaluation.tests[0].stdin, "1");
        assert!(evaluation.tests[0].status.is_accepted());
        assert_eq!(evaluation.tests[1].stdin, "2");
        assert_eq!(evaluation.tests[1].status.id(), 4);
    }
}
