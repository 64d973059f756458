//! Problem handler implementations

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    constants::roles,
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::ProblemService,
    state::AppState,
};

use super::{request::CreateProblemRequest, response::ProblemResponse};

/// Create a new problem (admin only).
///
/// The problem is persisted only after every declared reference solution
/// passes all visible test cases.
pub async fn create_problem(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<(StatusCode, Json<ProblemResponse>)> {
    payload.validate()?;

    if auth_user.role != roles::ADMIN {
        return Err(AppError::Forbidden(
            "Only admins can create problems".to_string(),
        ));
    }

    let problem =
        ProblemService::create_problem(state.db(), state.judge(), &auth_user.id, payload).await?;

    Ok((StatusCode::CREATED, Json(problem.into())))
}
