//! Problem request DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH};

/// Create problem request
///
/// Creation only succeeds once every reference solution passes all visible
/// test cases; see the problem service.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: String,

    /// Problem difficulty (optional)
    pub difficulty: Option<String>,

    /// Points awarded for solving
    pub points: i32,

    /// Tags for categorization
    pub tags: Option<Vec<String>>,

    /// Test cases shown to users; they gate the reference solutions
    #[validate(length(min = 1))]
    pub visible_test_cases: Vec<CreateTestCaseRequest>,

    /// Test cases used to grade submissions; never exposed
    pub hidden_test_cases: Vec<CreateTestCaseRequest>,

    /// Known-correct solutions that must pass before the problem is created
    #[validate(length(min = 1))]
    pub reference_solutions: Vec<CreateReferenceSolutionRequest>,
}

/// Test case payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTestCaseRequest {
    pub input: String,
    pub expected_output: String,
    pub explanation: Option<String>,
}

/// Reference solution payload
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateReferenceSolutionRequest {
    pub language: String,
    pub source_code: String,
}
