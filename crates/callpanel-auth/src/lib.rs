//! Extension authentication for Callpanel
//!
//! Agents log in with their extension number. This crate issues signed
//! session tokens, re-checks the extension on every request and exposes an
//! Actix-web extractor for protected handlers.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use callpanel_auth::{JwtService, SessionGuard};
//! use callpanel_core::traits::ExtensionDirectory;
//!
//! async fn login(directory: Arc<dyn ExtensionDirectory>) -> callpanel_core::AppResult<()> {
//!     let jwt = Arc::new(JwtService::new("your-secret-key", 3600));
//!     let guard = SessionGuard::new(directory, jwt);
//!
//!     let outcome = guard.login("2001").await?;
//!     let session = guard.current_session(&outcome.token).await?;
//!     guard.logout(&session);
//!     Ok(())
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;
pub mod session;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthenticatedExtension, SESSION_COOKIE};
pub use session::{LoginOutcome, SessionContext, SessionGuard};
