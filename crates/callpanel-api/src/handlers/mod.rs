//! HTTP request handlers

pub mod auth;
pub mod calls;
pub mod dashboard;
pub mod reports;
pub mod ws;

pub use auth::configure as configure_auth;
pub use calls::configure as configure_calls;
pub use dashboard::configure as configure_dashboard;
pub use reports::configure as configure_reports;
pub use ws::configure as configure_ws;
