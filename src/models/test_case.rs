//! Test case model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Test case database model
///
/// Test cases are immutable once their problem is created. Hidden test cases
/// grade learner submissions and never leave the evaluation pipeline; visible
/// ones are shown to users and gate reference solutions at problem creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestCase {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub position: i32,
    pub is_hidden: bool,
    pub input: String,
    pub expected_output: String,
    pub explanation: Option<String>,
    pub created_at: DateTime<Utc>,
}
