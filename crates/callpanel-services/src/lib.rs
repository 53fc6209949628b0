//! CDR aggregation and dashboard services for Callpanel
//!
//! Pure aggregation over call records (statistics, active calls, history
//! pages, daily series, report overview) plus the session-scoped query
//! service and the cancellable dashboard poller built on top of it.

pub mod aggregator;
pub mod daily_summary;
pub mod dashboard;
pub mod history;
pub mod poller;
pub mod query;
pub mod report;

pub use aggregator::{compute_statistics, select_active};
pub use daily_summary::build_daily_summary;
pub use dashboard::{DashboardSnapshot, QueryOutcome};
pub use history::{page_of, HistoryPage};
pub use poller::{DashboardPoller, SnapshotReceiver};
pub use query::CdrQueryService;
pub use report::{CallKind, CallTypeShare, ReportOverview};
