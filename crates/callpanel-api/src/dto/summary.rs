//! Daily summary and report DTOs

use callpanel_core::{calendar::DayWindow, format::format_duration, models::DailySummary};
use callpanel_services::ReportOverview;
use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Window selection for summaries and reports
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SummaryParams {
    /// Number of days, the configured default when absent
    #[validate(range(max = 366))]
    pub days: Option<u32>,

    /// First day of the window; without it the window ends today
    pub start_date: Option<NaiveDate>,
}

impl SummaryParams {
    /// Resolve the requested window
    pub fn window(&self, default_days: u32, today: NaiveDate, tz: Tz) -> DayWindow {
        let days = self.days.unwrap_or(default_days);
        match self.start_date {
            Some(start) => DayWindow::new(start, days, tz),
            None => DayWindow::ending_on(today, days, tz),
        }
    }
}

/// One day of the summary series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub total_calls: i64,
    pub answered_calls: i64,
    pub missed_calls: i64,
    pub average_answered_duration_seconds: i64,
    pub average_duration_display: String,
}

impl From<DailySummary> for DailySummaryResponse {
    fn from(summary: DailySummary) -> Self {
        Self {
            average_duration_display: format_duration(Some(
                summary.average_answered_duration_seconds,
            )),
            date: summary.date,
            total_calls: summary.total_calls,
            answered_calls: summary.answered_calls,
            missed_calls: summary.missed_calls,
            average_answered_duration_seconds: summary.average_answered_duration_seconds,
        }
    }
}

/// Summary series together with its window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeriesResponse {
    pub window: DayWindow,
    pub days: Vec<DailySummaryResponse>,
}

impl DailySeriesResponse {
    pub fn new(window: DayWindow, series: Vec<DailySummary>) -> Self {
        Self {
            window,
            days: series.into_iter().map(Into::into).collect(),
        }
    }
}

/// Report overview with its window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOverviewResponse {
    pub window: DayWindow,
    #[serde(flatten)]
    pub overview: ReportOverview,
    pub mean_daily_average_display: String,
}

impl ReportOverviewResponse {
    pub fn new(window: DayWindow, overview: ReportOverview) -> Self {
        Self {
            mean_daily_average_display: format_duration(Some(overview.mean_daily_average_seconds)),
            window,
            overview,
        }
    }
}
