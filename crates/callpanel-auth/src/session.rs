//! Extension sessions
//!
//! Login resolves an extension number against the directory and issues a
//! signed session token. Every later request re-checks the extension so a
//! block applied after login ends the session on the next request.

use crate::claims::Claims;
use crate::jwt::JwtService;
use callpanel_core::{
    models::{Extension, ExtensionProfile},
    traits::ExtensionDirectory,
    AppError, AppResult,
};
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    /// Signed session token
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// The extension that logged in
    pub extension: ExtensionProfile,
}

/// An authenticated, non-revoked session whose extension is still allowed
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub extension: Extension,
    pub claims: Claims,
}

impl SessionContext {
    /// Extension number of the session
    pub fn extension_number(&self) -> &str {
        &self.extension.number
    }

    /// Session identifier
    pub fn session_id(&self) -> &str {
        &self.claims.jti
    }
}

/// Issues, checks and revokes extension sessions
pub struct SessionGuard {
    directory: Arc<dyn ExtensionDirectory>,
    jwt: Arc<JwtService>,
    /// Revoked session ids mapped to their token expiry
    revoked: RwLock<HashMap<String, i64>>,
}

impl SessionGuard {
    pub fn new(directory: Arc<dyn ExtensionDirectory>, jwt: Arc<JwtService>) -> Self {
        Self {
            directory,
            jwt,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session for the extension identified by `identifier`
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidInput` if the identifier is blank
    /// - `AppError::ExtensionNotFound` if no extension has that number
    /// - `AppError::ExtensionBlocked` if the extension is blocked
    /// - `AppError::Database` if the directory cannot be reached
    #[instrument(skip(self))]
    pub async fn login(&self, identifier: &str) -> AppResult<LoginOutcome> {
        let number = identifier.trim();
        if number.is_empty() {
            return Err(AppError::InvalidInput(
                "Extension number is required".to_string(),
            ));
        }

        let extension = self.lookup(number).await?;

        let claims = Claims::new(&extension.number);
        let token = self.jwt.create_token(&claims)?;

        info!(
            extension = %extension.number,
            session = %claims.jti,
            "Extension logged in"
        );

        Ok(LoginOutcome {
            token,
            expires_in: self.jwt.expiration_secs(),
            extension: extension.profile(),
        })
    }

    /// Resolve the session a token belongs to
    ///
    /// # Errors
    ///
    /// - `AppError::TokenExpired` / `AppError::InvalidToken` for bad tokens
    /// - `AppError::SessionRevoked` after logout
    /// - `AppError::ExtensionNotFound` / `AppError::ExtensionBlocked` if the
    ///   extension was removed or blocked since login
    pub async fn current_session(&self, token: &str) -> AppResult<SessionContext> {
        let claims = self.jwt.validate_token(token)?;

        if self.is_revoked(&claims.jti) {
            debug!(session = %claims.jti, "Rejected revoked session");
            return Err(AppError::SessionRevoked);
        }

        let extension = self.lookup(&claims.sub).await?;

        Ok(SessionContext { extension, claims })
    }

    /// End a session
    ///
    /// The token stays cryptographically valid until it expires, so its id
    /// is remembered until then.
    pub fn logout(&self, session: &SessionContext) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write();

        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session.claims.jti.clone(), session.claims.exp);

        info!(
            extension = %session.extension.number,
            session = %session.claims.jti,
            "Extension logged out"
        );
    }

    /// Check whether a session id was logged out
    pub fn is_revoked(&self, session_id: &str) -> bool {
        self.revoked.read().contains_key(session_id)
    }

    async fn lookup(&self, number: &str) -> AppResult<Extension> {
        let extension = self
            .directory
            .find_by_number(number)
            .await?
            .ok_or_else(|| {
                warn!(extension = %number, "Unknown extension");
                AppError::ExtensionNotFound(number.to_string())
            })?;

        if !extension.can_login() {
            warn!(extension = %number, "Blocked extension");
            return Err(AppError::ExtensionBlocked(number.to_string()));
        }

        Ok(extension)
    }
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("jwt", &self.jwt)
            .field("revoked", &self.revoked.read().len())
            .finish()
    }
}
