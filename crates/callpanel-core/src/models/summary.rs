//! Aggregated call views
//!
//! Value objects produced by the aggregation layer. None of them are
//! persisted; they are recomputed on every request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Statistics over the calls of one day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CallStatistics {
    pub total_calls: i64,
    pub answered_calls: i64,
    pub missed_calls: i64,
    /// Calls inferred to be in progress
    pub active_calls: i64,
    pub average_answered_duration_seconds: f64,
}

impl CallStatistics {
    /// Answered share of all calls, rounded to a whole percent
    pub fn answer_rate_percent(&self) -> i64 {
        percent_of(self.answered_calls, self.total_calls)
    }
}

/// Calls of one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_calls: i64,
    pub answered_calls: i64,
    pub missed_calls: i64,
    /// Mean answered duration, rounded to the nearest second
    pub average_answered_duration_seconds: i64,
}

impl DailySummary {
    /// Zero-valued summary for `date`
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calls: 0,
            answered_calls: 0,
            missed_calls: 0,
            average_answered_duration_seconds: 0,
        }
    }
}

/// `part / whole` as a rounded percentage, 0 when `whole` is 0
pub fn percent_of(part: i64, whole: i64) -> i64 {
    if whole <= 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as i64
}
