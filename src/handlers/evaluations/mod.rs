//! Evaluation handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{middleware, routing::post, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Evaluation routes
///
/// `/run` is open; `/submit` requires an authenticated user.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/submit", post(handler::submit_solution))
        .route_layer(middleware::from_fn(auth_middleware))
        .route("/run", post(handler::run_evaluation))
}
