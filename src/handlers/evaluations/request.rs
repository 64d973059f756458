//! Evaluation request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_SOURCE_CODE_SIZE;

/// Evaluation request, shared by run and submit
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    /// Problem to evaluate against
    pub problem_id: Uuid,

    /// Candidate source code
    #[validate(length(min = 1, max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,

    /// Programming language name
    #[validate(length(min = 1, max = 20))]
    pub language: String,
}
