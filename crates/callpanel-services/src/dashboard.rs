//! Dashboard composition
//!
//! The dashboard runs its queries concurrently and keeps each result
//! separately, so one failing query leaves the others on screen.

use crate::query::CdrQueryService;
use callpanel_auth::SessionContext;
use callpanel_core::{
    models::{CallRecord, CallStatistics},
    AppError, AppResult,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{instrument, warn};

/// Result of one dashboard query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome<T> {
    Ready { data: T },
    Failed { error: String, message: String },
}

impl<T> QueryOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            Self::Failed { .. } => None,
        }
    }

    fn from_error(e: &AppError) -> Self {
        warn!(error = %e, "Dashboard query failed");
        Self::Failed {
            error: e.error_code().to_string(),
            message: e.to_string(),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            Self::Ready { data } => QueryOutcome::Ready { data: f(data) },
            Self::Failed { error, message } => QueryOutcome::Failed { error, message },
        }
    }
}

impl<T> From<AppResult<T>> for QueryOutcome<T> {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::Ready { data },
            Err(e) => Self::from_error(&e),
        }
    }
}

/// Everything the dashboard screen shows, from one poll
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    /// Poll sequence number, strictly increasing per poller
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    pub day: NaiveDate,
    pub stats: QueryOutcome<CallStatistics>,
    pub active_calls: QueryOutcome<Vec<CallRecord>>,
    pub recent_calls: QueryOutcome<Vec<CallRecord>>,
}

impl CdrQueryService {
    /// Run the dashboard queries for today
    #[instrument(skip(self, session), fields(extension = %session.extension_number()))]
    pub async fn dashboard(&self, session: &SessionContext, generation: u64) -> DashboardSnapshot {
        let day = self.today();

        let (stats, active_calls, recent_calls) = tokio::join!(
            self.today_stats(session, day),
            self.active_calls(session),
            self.recent_calls(session),
        );

        DashboardSnapshot {
            generation,
            generated_at: Utc::now(),
            day,
            stats: stats.into(),
            active_calls: active_calls.into(),
            recent_calls: recent_calls.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_error() {
        let outcome: QueryOutcome<i64> =
            Err(AppError::Database("connection reset".to_string())).into();

        assert!(!outcome.is_ready());
        assert_eq!(
            outcome,
            QueryOutcome::Failed {
                error: "database_error".to_string(),
                message: "Database error: connection reset".to_string(),
            }
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome: QueryOutcome<i64> = Ok(3).into();
        assert_eq!(outcome.ready(), Some(&3));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ready", "data": 3}));

        let json = serde_json::to_value(outcome.map(|n| n * 2)).unwrap();
        assert_eq!(json["data"], 6);
    }
}
