//! Database module
//!
//! This module handles database migrations and repositories.

pub mod repositories;

use sqlx::PgPool;

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
