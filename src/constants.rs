//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// AUTHENTICATION DEFAULTS
// =============================================================================

/// Default JWT token expiry in hours
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;

// =============================================================================
// JUDGE SERVICE DEFAULTS
// =============================================================================

/// Default initial interval between status polls in milliseconds
pub const DEFAULT_JUDGE_POLL_INTERVAL_MS: u64 = 500;

/// Cap on the backoff interval between status polls in milliseconds
pub const DEFAULT_JUDGE_MAX_POLL_INTERVAL_MS: u64 = 4_000;

/// Default overall deadline for a batch to finish judging, in seconds
pub const DEFAULT_JUDGE_POLL_DEADLINE_SECS: u64 = 30;

/// Timeout for a single HTTP call to the judge service, in seconds
pub const JUDGE_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// SUBMISSION STATUSES
// =============================================================================

/// Submission lifecycle statuses
pub mod statuses {
    pub const PENDING: &str = "pending";
    pub const ACCEPTED: &str = "accepted";
    pub const FAILED: &str = "failed";
}

// =============================================================================
// USER ROLES
// =============================================================================

/// User role identifiers
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const PARTICIPANT: &str = "participant";
}

// =============================================================================
// API VERSIONING
// =============================================================================

/// Current API version
pub const API_VERSION: &str = "v1";

/// API base path
pub const API_BASE_PATH: &str = "/api/v1";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum problem title length
pub const MAX_PROBLEM_TITLE_LENGTH: u64 = 256;

/// Maximum problem description length
pub const MAX_PROBLEM_DESCRIPTION_LENGTH: u64 = 65535;

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: u64 = 1024 * 1024;

/// Maximum test case input size in bytes (10 MB)
pub const MAX_TEST_CASE_INPUT_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum test case output size in bytes (10 MB)
pub const MAX_TEST_CASE_OUTPUT_SIZE: u64 = 10 * 1024 * 1024;
