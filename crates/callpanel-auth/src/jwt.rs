//! Session token signing
//!
//! Tokens are HS256 JWTs carrying [`Claims`]. A token only proves who the
//! extension was at login; [`crate::SessionGuard`] decides whether the
//! session is still usable.

use crate::claims::Claims;
use callpanel_core::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::{debug, error, warn};

/// Signs and verifies session tokens with a shared secret
#[derive(Clone)]
pub struct JwtService {
    session_ttl_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, session_ttl_secs: i64) -> Self {
        let secret = secret.as_bytes();
        Self {
            session_ttl_secs,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign `claims`; claims without an expiry get the session lifetime
    pub fn create_token(&self, claims: &Claims) -> Result<String, AppError> {
        let signed = Claims {
            exp: match claims.exp {
                0 => (Utc::now() + Duration::seconds(self.session_ttl_secs)).timestamp(),
                exp => exp,
            },
            ..claims.clone()
        };

        debug!(extension = %signed.sub, session = %signed.jti, "Signing session token");

        encode(&Header::default(), &signed, &self.encoding_key).map_err(|e| {
            error!(error = %e, "Session token signing failed");
            AppError::InvalidToken(format!("Token creation failed: {}", e))
        })
    }

    /// Verify a token's signature and expiry
    ///
    /// Expired tokens yield `AppError::TokenExpired`, anything else that
    /// fails to verify yields `AppError::InvalidToken`.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => {
                    warn!(error = %e, "Rejected session token");
                    AppError::InvalidToken(format!("Token validation failed: {}", e))
                }
            })?;

        // Validation allows clock leeway; sessions end exactly at `exp`
        if claims.is_expired() {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }

    /// Lifetime in seconds of the sessions this service signs
    pub fn expiration_secs(&self) -> i64 {
        self.session_ttl_secs
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
