//! Evaluation handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    services::evaluation_service::{EvaluationMode, EvaluationService},
    state::AppState,
};

use super::{request::EvaluationRequest, response::EvaluationResponse};

/// Run candidate code against a problem's visible test cases.
///
/// Nothing is persisted; this exists so a user can sample behavior without
/// committing a graded attempt.
pub async fn run_evaluation(
    State(state): State<AppState>,
    Json(payload): Json<EvaluationRequest>,
) -> AppResult<(StatusCode, Json<EvaluationResponse>)> {
    payload.validate()?;

    let evaluation = EvaluationService::evaluate(
        state.db(),
        state.judge(),
        &payload.problem_id,
        &payload.code,
        &payload.language,
        EvaluationMode::Run,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(evaluation.into())))
}

/// Submit a graded attempt: evaluates against the hidden test cases,
/// records the submission, and updates the solved set on full acceptance.
pub async fn submit_solution(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<EvaluationRequest>,
) -> AppResult<(StatusCode, Json<EvaluationResponse>)> {
    payload.validate()?;

    let evaluation = EvaluationService::evaluate(
        state.db(),
        state.judge(),
        &payload.problem_id,
        &payload.code,
        &payload.language,
        EvaluationMode::Submit {
            user_id: auth_user.id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(evaluation.into())))
}
