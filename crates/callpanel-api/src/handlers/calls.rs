//! Call handlers
//!
//! Day statistics, in-progress calls and paginated call history.

use crate::dto::{
    ActiveCallsResponse, ApiResponse, CallHistoryResponse, CallStatsResponse, PaginationParams,
    StatsParams,
};
use actix_web::{web, HttpResponse};
use callpanel_auth::AuthenticatedExtension;
use callpanel_core::AppError;
use callpanel_services::CdrQueryService;
use std::sync::Arc;
use tracing::{debug, instrument};
use validator::Validate;

/// Paginated call history, most recent first
///
/// GET /api/v1/calls
#[instrument(skip(service, session))]
pub async fn list_calls(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let per_page = query.per_page_or(service.settings().history_page_size);
    let page = service.history(&session, query.page, per_page).await?;

    debug!(
        "Returning page {} of {} ({} total calls)",
        page.pagination.page, page.pagination.total_pages, page.pagination.total
    );

    Ok(HttpResponse::Ok().json(CallHistoryResponse::new(page, service.tz())))
}

/// Statistics for one day
///
/// GET /api/v1/calls/stats
#[instrument(skip(service, session))]
pub async fn call_stats(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
    query: web::Query<StatsParams>,
) -> Result<HttpResponse, AppError> {
    let day = query.date.unwrap_or_else(|| service.today());
    let stats = service.today_stats(&session, day).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(CallStatsResponse::new(day, stats))))
}

/// Calls inferred to be in progress
///
/// GET /api/v1/calls/active
#[instrument(skip(service, session))]
pub async fn active_calls(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
) -> Result<HttpResponse, AppError> {
    let calls = service.active_calls(&session).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ActiveCallsResponse::new(
        calls,
        service.tz(),
    ))))
}

/// Configure call routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/calls")
            .route("", web::get().to(list_calls))
            .route("/stats", web::get().to(call_stats))
            .route("/active", web::get().to(active_calls)),
    );
}
