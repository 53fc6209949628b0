//! Report handlers

use crate::dto::{ApiResponse, DailySeriesResponse, ReportOverviewResponse, SummaryParams};
use actix_web::{web, HttpResponse};
use callpanel_auth::AuthenticatedExtension;
use callpanel_core::AppError;
use callpanel_services::CdrQueryService;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

/// Per-day call counts and averages
///
/// GET /api/v1/reports/daily-summary
#[instrument(skip(service, session))]
pub async fn daily_summary(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
    query: web::Query<SummaryParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let window = query.window(service.settings().summary_days, service.today(), service.tz());
    let series = service
        .daily_summary(&session, window.start_day, window.days)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(DailySeriesResponse::new(window, series))))
}

/// Report headline numbers
///
/// GET /api/v1/reports/overview
#[instrument(skip(service, session))]
pub async fn overview(
    service: web::Data<Arc<CdrQueryService>>,
    session: AuthenticatedExtension,
    query: web::Query<SummaryParams>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let window = query.window(service.settings().summary_days, service.today(), service.tz());
    let overview = service
        .report_overview(&session, window.start_day, window.days)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ReportOverviewResponse::new(
        window, overview,
    ))))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/daily-summary", web::get().to(daily_summary))
            .route("/overview", web::get().to(overview)),
    );
}
