//! Application configuration
//!
//! This module provides centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.

use crate::error::AppError;
use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma-separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9001
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Database configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    20
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

/// Authentication configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,

    /// JWT token expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: i64,

    /// Whether the session cookie is marked `Secure`
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_jwt_expiration() -> i64 {
    28800 // one 8h shift
}

/// Dashboard and reporting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Interval between dashboard refreshes pushed over the WebSocket
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Number of recent calls shown on the dashboard
    #[serde(default = "default_recent_calls_limit")]
    pub recent_calls_limit: i64,

    /// Default page size of the call history
    #[serde(default = "default_history_page_size")]
    pub history_page_size: i64,

    /// Default number of days in the reporting window
    #[serde(default = "default_summary_days")]
    pub summary_days: u32,

    /// IANA timezone used for "today", report windows and day bucketing
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Answer rate the reports compare against
    #[serde(default = "default_answer_rate_target")]
    pub answer_rate_target_percent: u32,
}

fn default_poll_interval() -> u64 {
    30
}

fn default_recent_calls_limit() -> i64 {
    5
}

fn default_history_page_size() -> i64 {
    10
}

fn default_summary_days() -> u32 {
    7
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_answer_rate_target() -> u32 {
    80
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            recent_calls_limit: default_recent_calls_limit(),
            history_page_size: default_history_page_size(),
            summary_days: default_summary_days(),
            timezone: default_timezone(),
            answer_rate_target_percent: default_answer_rate_target(),
        }
    }
}

impl DashboardConfig {
    /// Parse the configured timezone
    pub fn tz(&self) -> Result<Tz, AppError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Config(format!("Invalid timezone '{}': {}", self.timezone, e)))
    }

    /// Polling interval as a `Duration` (never shorter than one second)
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9001)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("database.max_connections", 20)?
            .set_default("auth.jwt_expiration_secs", 28800)?
            .set_default("dashboard.poll_interval_secs", 30)?
            .set_default("dashboard.recent_calls_limit", 5)?
            .set_default("dashboard.history_page_size", 10)?
            .set_default("dashboard.summary_days", 7)?
            .set_default("dashboard.timezone", "UTC")?
            .set_default("dashboard.answer_rate_target_percent", 80)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with CALLPANEL_ prefix
            .add_source(
                Environment::with_prefix("CALLPANEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(Environment::with_prefix("CALLPANEL").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dashboard_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.recent_calls_limit, 5);
        assert_eq!(config.summary_days, 7);
        assert_eq!(config.tz().unwrap(), Tz::UTC);
    }

    #[test]
    fn test_invalid_timezone() {
        let config = DashboardConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.tz(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_poll_interval_floor() {
        let config = DashboardConfig {
            poll_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
