//! Statistics DTOs

use callpanel_core::{format::format_duration, models::CallStatistics};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Query parameters for day statistics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsParams {
    /// Day to report on, today when absent
    pub date: Option<NaiveDate>,
}

/// Statistics of one day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallStatsResponse {
    pub date: NaiveDate,
    pub total_calls: i64,
    pub answered_calls: i64,
    pub missed_calls: i64,
    pub active_calls: i64,
    pub average_answered_duration_seconds: f64,
    pub average_duration_display: String,
    /// Dashboard "success rate"
    pub answer_rate_percent: i64,
}

impl CallStatsResponse {
    pub fn new(date: NaiveDate, stats: CallStatistics) -> Self {
        let average = stats.average_answered_duration_seconds;
        Self {
            date,
            total_calls: stats.total_calls,
            answered_calls: stats.answered_calls,
            missed_calls: stats.missed_calls,
            active_calls: stats.active_calls,
            average_answered_duration_seconds: average,
            average_duration_display: format_duration(Some(average.round() as i64)),
            answer_rate_percent: stats.answer_rate_percent(),
        }
    }
}
