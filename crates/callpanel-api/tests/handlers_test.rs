//! Handler tests against in-memory stores

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use callpanel_api::configure_api;
use callpanel_auth::{JwtService, SessionGuard};
use callpanel_core::{
    config::{AuthConfig, DashboardConfig},
    models::{CallRecord, Disposition, Extension},
    traits::{CallRecordFilter, CallRecordStore, ExtensionDirectory, Pagination},
    AppError, AppResult,
};
use callpanel_services::{page_of, CdrQueryService};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;

struct MemoryStore {
    records: Vec<CallRecord>,
}

#[async_trait]
impl CallRecordStore for MemoryStore {
    async fn fetch_call_records(&self, filter: &CallRecordFilter) -> AppResult<Vec<CallRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    async fn fetch_call_records_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CallRecord>, i64)> {
        let page = page_of(&self.records, Pagination::new(offset / limit + 1, limit));
        Ok((page.records, page.pagination.total))
    }
}

struct DownStore;

#[async_trait]
impl CallRecordStore for DownStore {
    async fn fetch_call_records(&self, _filter: &CallRecordFilter) -> AppResult<Vec<CallRecord>> {
        Err(AppError::Database("connection refused".to_string()))
    }

    async fn fetch_call_records_page(
        &self,
        _offset: i64,
        _limit: i64,
    ) -> AppResult<(Vec<CallRecord>, i64)> {
        Err(AppError::Database("connection refused".to_string()))
    }
}

struct MemoryDirectory;

#[async_trait]
impl ExtensionDirectory for MemoryDirectory {
    async fn find_by_number(&self, number: &str) -> AppResult<Option<Extension>> {
        let extension = match number {
            "2001" => Extension {
                id: 1,
                number: "2001".to_string(),
                name: "Reception".to_string(),
                ..Default::default()
            },
            "2002" => Extension {
                id: 2,
                number: "2002".to_string(),
                blocked: true,
                ..Default::default()
            },
            _ => return Ok(None),
        };
        Ok(Some(extension))
    }
}

fn todays_records() -> Vec<CallRecord> {
    let now = Utc::now();
    let call = |id: &str, seconds_ago: i64, disposition: Option<&str>, duration: i64| CallRecord {
        id: id.to_string(),
        timestamp: now - Duration::seconds(seconds_ago),
        source: "2001".to_string(),
        destination: "5511999998888".to_string(),
        duration_seconds: Some(duration),
        disposition: Disposition::from_raw(disposition),
        last_application: "Dial".to_string(),
        user_field: None,
    };

    (0..12)
        .map(|i| {
            let disposition = match i % 3 {
                0 => Some("ANSWERED"),
                1 => Some("NO ANSWER"),
                _ => None,
            };
            call(&format!("{:02}", i), i, disposition, 60)
        })
        .collect()
}

fn app_data(
    store: Arc<dyn CallRecordStore>,
) -> (
    web::Data<Arc<CdrQueryService>>,
    web::Data<Arc<SessionGuard>>,
    web::Data<AuthConfig>,
) {
    let service = CdrQueryService::new(store, DashboardConfig::default()).unwrap();
    let jwt = Arc::new(JwtService::new("handler-test-secret", 3600));
    let guard = SessionGuard::new(Arc::new(MemoryDirectory), jwt);
    let auth = AuthConfig {
        jwt_secret: "handler-test-secret".to_string(),
        jwt_expiration_secs: 3600,
        secure_cookie: false,
    };

    (
        web::Data::new(Arc::new(service)),
        web::Data::new(Arc::new(guard)),
        web::Data::new(auth),
    )
}

macro_rules! init_app {
    ($store:expr) => {{
        let (service, guard, auth) = app_data($store);
        test::init_service(
            App::new()
                .app_data(service)
                .app_data(guard)
                .app_data(auth)
                .service(web::scope("/api/v1").configure(configure_api)),
        )
        .await
    }};
}

macro_rules! login {
    ($app:expr, $extension:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "extension": $extension }))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! token {
    ($app:expr) => {{
        let resp = login!($app, "2001");
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        body["data"]["access_token"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_login_sets_cookie() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));

    let resp = login!(app, "2001");
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "token")
        .expect("session cookie");
    assert!(cookie.http_only().unwrap_or(false));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["extension"]["number"], "2001");
}

#[actix_web::test]
async fn test_login_rejections() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));

    let resp = login!(app, "9999");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "extension_not_found");

    let resp = login!(app, "2002");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "extension_blocked");

    let resp = login!(app, "");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));

    for uri in ["/api/v1/calls", "/api/v1/calls/stats", "/api/v1/dashboard", "/api/v1/auth/me"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[actix_web::test]
async fn test_call_history_pages() {
    let app = init_app!(Arc::new(MemoryStore {
        records: todays_records()
    }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/calls?page=2")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["per_page"], 10);
    assert_eq!(body["pagination"]["total_pages"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["showing"], json!({"from": 11, "to": 12, "total": 12}));
    assert_eq!(body["data"][0]["duration_display"], "1:00");
}

#[actix_web::test]
async fn test_invalid_page_rejected() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/calls?page=0")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_huge_page_number_is_empty() {
    let app = init_app!(Arc::new(MemoryStore {
        records: todays_records()
    }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/calls?page=9223372036854775807")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pagination"]["total"], 12);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert!(body["showing"].is_null());
}

#[actix_web::test]
async fn test_dates_at_calendar_edge_rejected() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));
    let token = token!(app);

    for uri in [
        "/api/v1/reports/daily-summary?days=7&start_date=%2B262142-12-30",
        "/api/v1/reports/overview?days=7&start_date=%2B262142-12-30",
        "/api/v1/calls/stats?date=%2B262142-12-31",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "invalid_input", "{}", uri);
    }
}

#[actix_web::test]
async fn test_active_calls_flagged_inferred() {
    let app = init_app!(Arc::new(MemoryStore {
        records: todays_records()
    }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/calls/active")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["inferred"], true);
    assert_eq!(body["data"]["count"], 4);
}

#[actix_web::test]
async fn test_daily_summary_window() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/reports/daily-summary?days=7&start_date=2024-01-01")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let days = body["data"]["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[6]["date"], "2024-01-07");
    assert!(days.iter().all(|d| d["total_calls"] == 0));
}

#[actix_web::test]
async fn test_store_failure_maps_to_503() {
    let app = init_app!(Arc::new(DownStore));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/calls/stats")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "database_error");
}

#[actix_web::test]
async fn test_dashboard_reports_failures_per_query() {
    let app = init_app!(Arc::new(DownStore));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["stats"]["status"], "failed");
    assert_eq!(body["data"]["recent_calls"]["error"], "database_error");
}

#[actix_web::test]
async fn test_dashboard_stats() {
    let app = init_app!(Arc::new(MemoryStore {
        records: todays_records()
    }));
    let token = token!(app);

    let req = test::TestRequest::get()
        .uri("/api/v1/dashboard")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let stats = &body["data"]["stats"];
    assert_eq!(stats["status"], "ready");
    assert_eq!(stats["data"]["answered_calls"], 4);
    assert_eq!(stats["data"]["active_calls"], 4);
    assert_eq!(
        body["data"]["recent_calls"]["data"].as_array().unwrap().len(),
        5
    );
}

#[actix_web::test]
async fn test_logout_revokes_token() {
    let app = init_app!(Arc::new(MemoryStore { records: Vec::new() }));
    let token = token!(app);
    let bearer = format!("Bearer {}", token);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["extension"]["number"], "2001");

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(("Authorization", bearer))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "session_revoked");
}
