//! CodeArena - Remote-Judged Programming Platform
//!
//! This library provides the core functionality for the CodeArena platform:
//! users submit source code against a problem's test cases and receive a
//! pass/fail verdict with runtime and memory metrics. Code execution is
//! delegated to an external judge service reached over a submit-and-poll
//! protocol; this service owns batching, verdict reduction, and durable
//! bookkeeping.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic (evaluation, problem validation)
//! - **Judge**: Remote judge service client
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
