//! API layer for Callpanel
//!
//! HTTP handlers for extension sessions, call statistics, call history,
//! daily reports and the live dashboard feed.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

use actix_web::web;

pub use dto::{ApiResponse, PaginationParams};
pub use handlers::{
    configure_auth, configure_calls, configure_dashboard, configure_reports, configure_ws,
};

/// Mount every `/api/v1` route
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth)
        .configure(configure_dashboard)
        .configure(configure_calls)
        .configure(configure_reports);
}
