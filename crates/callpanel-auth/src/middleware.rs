//! Actix-web request extractor for extension sessions

use crate::session::{SessionContext, SessionGuard};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use callpanel_core::error::AppError;
use futures::future::LocalBoxFuture;
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

/// Name of the cookie holding the session token
pub const SESSION_COOKIE: &str = "token";

/// Extract the session token from request
///
/// Checks for token in the following order:
/// 1. Authorization header (Bearer token)
/// 2. Cookie named "token"
pub fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Authenticated extension extractor
///
/// Resolves the request's token through the [`SessionGuard`] registered as
/// `web::Data<Arc<SessionGuard>>`. Rejections carry the JSON error body of
/// the underlying [`AppError`].
///
/// # Examples
///
/// ```no_run
/// use actix_web::HttpResponse;
/// use callpanel_auth::AuthenticatedExtension;
///
/// async fn protected_handler(session: AuthenticatedExtension) -> HttpResponse {
///     HttpResponse::Ok().json(serde_json::json!({
///         "extension": session.extension_number(),
///     }))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthenticatedExtension(pub SessionContext);

impl AuthenticatedExtension {
    pub fn into_inner(self) -> SessionContext {
        self.0
    }
}

impl Deref for AuthenticatedExtension {
    type Target = SessionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedExtension {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let guard = req
            .app_data::<web::Data<Arc<SessionGuard>>>()
            .map(|data| data.get_ref().clone());
        let token = extract_token_from_request(req);

        Box::pin(async move {
            let guard = guard.ok_or_else(|| {
                warn!("SessionGuard not found in app data");
                AppError::Unauthorized("Authentication service not configured".to_string())
            })?;

            let token = token.ok_or_else(|| {
                debug!("No authentication token found in request");
                AppError::Unauthorized("No authentication token provided".to_string())
            })?;

            let session = guard.current_session(&token).await?;

            debug!(
                extension = %session.extension_number(),
                "Extension authenticated successfully"
            );

            Ok(AuthenticatedExtension(session))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();

        assert_eq!(
            extract_token_from_request(&req),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn test_extract_cookie_token() {
        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(
            extract_token_from_request(&req),
            Some("from-cookie".to_string())
        );
    }

    #[test]
    fn test_header_takes_precedence() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer from-header"))
            .cookie(Cookie::new(SESSION_COOKIE, "from-cookie"))
            .to_http_request();

        assert_eq!(
            extract_token_from_request(&req),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn test_non_bearer_header_ignored() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();

        assert_eq!(extract_token_from_request(&req), None);
    }
}
