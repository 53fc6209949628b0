//! Dashboard handler

use crate::dto::{ApiResponse, DashboardResponse};
use actix_web::{web, HttpResponse};
use callpanel_auth::AuthenticatedExtension;
use callpanel_services::CdrQueryService;
use std::sync::Arc;
use tracing::instrument;

/// Today's statistics, active calls and recent calls in one response
///
/// Individual query failures are reported inside the payload.
///
/// GET /api/v1/dashboard
#[instrument(skip(service, session))]
pub async fn get_dashboard(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
) -> HttpResponse {
    let snapshot = service.dashboard(&session, 0).await;
    HttpResponse::Ok().json(ApiResponse::success(DashboardResponse::new(
        snapshot,
        service.tz(),
    )))
}

/// Configure dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/dashboard", web::get().to(get_dashboard));
}
