//! Evaluation response DTOs

use serde::Serialize;

use crate::services::evaluation_service::{Evaluation, TestEvaluation};

/// Evaluation outcome returned by both run and submit.
///
/// The aggregate keys are camelCase while per-test entries are snake_case;
/// both shapes are fixed by the client contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub accepted: bool,
    pub total_test_cases: i32,
    pub passed_test_cases: i32,
    /// Sum of per-test runtimes in milliseconds
    pub runtime: f64,
    /// Peak per-test memory in kilobytes
    pub memory: i64,
    pub test_cases: Vec<TestCaseDetail>,
}

/// Per-test detail entry
#[derive(Debug, Serialize)]
pub struct TestCaseDetail {
    pub stdin: String,
    pub expected_output: String,
    pub stdout: Option<String>,
    pub status_id: i32,
    pub runtime: f64,
    pub memory: i64,
    pub error: Option<String>,
    pub explanation: Option<String>,
}

impl From<Evaluation> for EvaluationResponse {
    fn from(evaluation: Evaluation) -> Self {
        Self {
            accepted: evaluation.accepted,
            total_test_cases: evaluation.total_test_cases,
            passed_test_cases: evaluation.passed_test_cases,
            runtime: evaluation.runtime_ms,
            memory: evaluation.memory_kb,
            test_cases: evaluation.tests.into_iter().map(TestCaseDetail::from).collect(),
        }
    }
}

impl From<TestEvaluation> for TestCaseDetail {
    fn from(test: TestEvaluation) -> Self {
        Self {
            stdin: test.stdin,
            expected_output: test.expected_output,
            stdout: test.stdout,
            status_id: test.status.id(),
            runtime: test.runtime_ms,
            memory: test.memory_kb,
            error: test.error,
            explanation: test.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::{JudgeResult, JudgeStatus};
    use crate::services::evaluation_service::{EvaluationService, GradingCase};

    #[test]
    fn test_response_shape_matches_client_contract() {
        let cases = vec![GradingCase {
            input: "1 2".to_string(),
            expected_output: "3".to_string(),
            explanation: Some("simple sum".to_string()),
        }];
        let results = vec![JudgeResult {
            status: JudgeStatus::WrongAnswer,
            time_ms: 12.5,
            memory_kb: 1024,
            stdout: Some("4".to_string()),
            stderr: None,
            compile_output: None,
        }];

        let response = EvaluationResponse::from(EvaluationService::reduce(&cases, results));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["accepted"], false);
        assert_eq!(json["totalTestCases"], 1);
        assert_eq!(json["passedTestCases"], 0);
        assert_eq!(json["runtime"], 12.5);
        assert_eq!(json["memory"], 1024);

        let test = &json["testCases"][0];
        assert_eq!(test["stdin"], "1 2");
        assert_eq!(test["expected_output"], "3");
        assert_eq!(test["stdout"], "4");
        assert_eq!(test["status_id"], 4);
        assert_eq!(test["explanation"], "simple sum");
    }
}
