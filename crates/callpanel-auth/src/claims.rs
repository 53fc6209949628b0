//! JWT Claims structure
//!
//! Defines the claims carried by an extension session token.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims
///
/// The subject is the extension number; `jti` identifies the session so
/// that logout can revoke it before expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (extension number)
    pub sub: String,

    /// Session identifier
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create new claims for an extension
    ///
    /// # Examples
    ///
    /// ```
    /// use callpanel_auth::Claims;
    ///
    /// let claims = Claims::new("2001");
    /// assert_eq!(claims.sub, "2001");
    /// assert!(!claims.jti.is_empty());
    /// ```
    pub fn new(extension: &str) -> Self {
        let now = Utc::now();

        Self {
            sub: extension.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: 0, // Will be set by JwtService
        }
    }

    /// Create new claims with custom expiration duration
    pub fn with_expiration(extension: &str, expires_in_secs: i64) -> Self {
        let mut claims = Self::new(extension);
        claims.exp = (Utc::now() + Duration::seconds(expires_in_secs)).timestamp();
        claims
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        self.exp <= now
    }

    /// Extension number the session belongs to
    pub fn extension(&self) -> &str {
        &self.sub
    }
}
