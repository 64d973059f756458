//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JUDGE_MAX_POLL_INTERVAL_MS,
    DEFAULT_JUDGE_POLL_DEADLINE_SECS, DEFAULT_JUDGE_POLL_INTERVAL_MS, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// Remote judge service configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL of the judge service
    pub base_url: String,
    /// Optional API key sent with every request
    pub api_key: Option<String>,
    /// Initial interval between status polls
    pub poll_interval: Duration,
    /// Cap on the backed-off poll interval
    pub max_poll_interval: Duration,
    /// Overall deadline for a batch to reach terminal status
    pub poll_deadline: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let poll_interval_ms: u64 = env::var("JUDGE_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_POLL_INTERVAL_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_POLL_INTERVAL_MS".to_string()))?;
        let max_poll_interval_ms: u64 = env::var("JUDGE_MAX_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_MAX_POLL_INTERVAL_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_MAX_POLL_INTERVAL_MS".to_string()))?;
        let poll_deadline_secs: u64 = env::var("JUDGE_POLL_DEADLINE_SECS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_POLL_DEADLINE_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_POLL_DEADLINE_SECS".to_string()))?;

        Ok(Self {
            base_url: env::var("JUDGE_URL").map_err(|_| ConfigError::Missing("JUDGE_URL".to_string()))?,
            api_key: env::var("JUDGE_API_KEY").ok(),
            poll_interval: Duration::from_millis(poll_interval_ms),
            max_poll_interval: Duration::from_millis(max_poll_interval_ms),
            poll_deadline: Duration::from_secs(poll_deadline_secs),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        // Test that defaults are applied when env vars are not set
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_judge_poll_defaults() {
        let judge = JudgeConfig {
            base_url: "http://localhost:2358".to_string(),
            api_key: None,
            poll_interval: Duration::from_millis(DEFAULT_JUDGE_POLL_INTERVAL_MS),
            max_poll_interval: Duration::from_millis(DEFAULT_JUDGE_MAX_POLL_INTERVAL_MS),
            poll_deadline: Duration::from_secs(DEFAULT_JUDGE_POLL_DEADLINE_SECS),
        };
        assert!(judge.poll_interval < judge.max_poll_interval);
        assert!(judge.max_poll_interval < judge.poll_deadline);
    }
}
