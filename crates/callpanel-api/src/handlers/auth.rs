//! Authentication handlers
//!
//! HTTP handlers for extension login, logout and session info.

use crate::dto::auth::{LoginRequest, LoginResponse, LogoutResponse, MeResponse};
use crate::dto::ApiResponse;
use actix_web::{cookie::Cookie, web, HttpResponse};
use callpanel_auth::{AuthenticatedExtension, SessionGuard, SESSION_COOKIE};
use callpanel_core::{config::AuthConfig, AppError};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Login endpoint
///
/// POST /api/v1/auth/login
#[instrument(skip(guard, auth_config, req))]
pub async fn login(
    guard: web::Data<Arc<SessionGuard>>,
    auth_config: web::Data<AuthConfig>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Login validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    debug!(extension = %req.extension.trim(), "Processing login request");

    let outcome = guard.login(&req.extension).await?;
    let expires_in = outcome.expires_in;

    let cookie = Cookie::build(SESSION_COOKIE, outcome.token.clone())
        .path("/")
        .http_only(true)
        .secure(auth_config.secure_cookie)
        .max_age(actix_web::cookie::time::Duration::seconds(expires_in))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(LoginResponse::from(outcome))))
}

/// Logout endpoint
///
/// POST /api/v1/auth/logout
#[instrument(skip(guard, session))]
pub async fn logout(
    guard: web::Data<Arc<SessionGuard>>,
    session: AuthenticatedExtension,
) -> HttpResponse {
    guard.logout(&session);

    let cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(actix_web::cookie::time::Duration::seconds(0))
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(LogoutResponse::default()))
}

/// Current session info
///
/// GET /api/v1/auth/me
#[instrument(skip(session))]
pub async fn me(session: AuthenticatedExtension) -> Result<HttpResponse, AppError> {
    let token_expires_at = Utc
        .timestamp_opt(session.claims.exp, 0)
        .single()
        .ok_or_else(|| AppError::Internal("Invalid token expiration".to_string()))?;

    info!(extension = %session.extension_number(), "Session info requested");

    let response = MeResponse {
        extension: session.extension.profile(),
        session_id: session.session_id().to_string(),
        token_expires_at,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
