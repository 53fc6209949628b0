//! Authentication DTOs
//!
//! Request and response types for authentication endpoints.

use callpanel_auth::LoginOutcome;
use callpanel_core::models::ExtensionProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Extension number
    #[validate(length(min = 1, max = 32, message = "Extension number is required"))]
    pub extension: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT)
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Token expiration time in seconds
    pub expires_in: i64,

    /// Logged-in extension
    pub extension: ExtensionProfile,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.token,
            token_type: "Bearer".to_string(),
            expires_in: outcome.expires_in,
            extension: outcome.extension,
        }
    }
}

/// Logout response
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            message: "Logged out successfully".to_string(),
        }
    }
}

/// Current session info
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub extension: ExtensionProfile,
    pub session_id: String,
    pub token_expires_at: DateTime<Utc>,
}
