//! Reference solution model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-supplied known-correct solution, validated before the problem
/// is published.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ReferenceSolution {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub position: i32,
    pub language: String,
    #[serde(skip_serializing)]
    pub source_code: String,
    pub created_at: DateTime<Utc>,
}
