//! Unified error handling for Callpanel
//!
//! This module provides the error type shared by every crate of the
//! workspace, with automatic HTTP response mapping.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Main application error type
///
/// All errors in the application should be converted to this type.
/// It implements `ResponseError` for automatic HTTP response generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Store Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Database pool error: {0}")]
    Pool(String),

    // ==================== Authentication Errors ====================
    #[error("Extension not found: {0}")]
    ExtensionNotFound(String),

    #[error("Extension blocked: {0}. Contact the administrator for more information")]
    ExtensionBlocked(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Session revoked")]
    SessionRevoked,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    // ==================== Validation Errors ====================
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::ExtensionNotFound(_)
            | AppError::InvalidToken(_)
            | AppError::TokenExpired
            | AppError::SessionRevoked
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            AppError::ExtensionBlocked(_) => StatusCode::FORBIDDEN,

            // 503 Service Unavailable
            AppError::Database(_) | AppError::Pool(_) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Pool(_) => "pool_error",
            AppError::ExtensionNotFound(_) => "extension_not_found",
            AppError::ExtensionBlocked(_) => "extension_blocked",
            AppError::TokenExpired => "token_expired",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::SessionRevoked => "session_revoked",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Validation(_) => "validation_error",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }

    /// True when the record store could not be reached or rejected a query
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::Pool(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        });

        HttpResponse::build(status).json(body)
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ExtensionNotFound("2001".to_string()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::ExtensionBlocked("2001".to_string()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Database("connection refused".to_string()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::Validation("page".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::TokenExpired.error_code(), "token_expired");
        assert_eq!(AppError::SessionRevoked.error_code(), "session_revoked");
        assert_eq!(
            AppError::Pool("timeout".to_string()).error_code(),
            "pool_error"
        );
    }

    #[test]
    fn test_fetch_failure_classification() {
        assert!(AppError::Database("x".to_string()).is_fetch_failure());
        assert!(AppError::Pool("x".to_string()).is_fetch_failure());
        assert!(!AppError::TokenExpired.is_fetch_failure());
    }
}
