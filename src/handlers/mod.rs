//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod evaluations;
pub mod health;
pub mod problems;

use axum::{middleware, Router};

use crate::{middleware::auth::auth_middleware, state::AppState};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(evaluations::routes())
        .nest(
            "/problems",
            problems::routes().route_layer(middleware::from_fn(auth_middleware)),
        )
}
