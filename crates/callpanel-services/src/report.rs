//! Report overview over a daily series

use callpanel_core::models::{percent_of, DailySummary};
use serde::Serialize;

/// Outcome class in the answered/missed breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallKind {
    Answered,
    Missed,
}

/// Share of one outcome class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallTypeShare {
    pub kind: CallKind,
    pub count: i64,
    pub percentage: i64,
}

/// Headline numbers of the reports page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOverview {
    pub total_calls: i64,
    pub answered_calls: i64,
    pub missed_calls: i64,
    pub answer_rate_percent: i64,
    pub target_percent: i64,
    /// Answer rate minus target, negative when below target
    pub delta_vs_target: i64,
    /// Mean of the daily averages, days without calls included
    pub mean_daily_average_seconds: i64,
    /// Highest daily total, the chart scale
    pub peak_daily_total: i64,
    pub breakdown: Vec<CallTypeShare>,
}

impl ReportOverview {
    /// Summarize `series` against an answer-rate target
    pub fn from_series(series: &[DailySummary], target_percent: u32) -> Self {
        let total: i64 = series.iter().map(|day| day.total_calls).sum();
        let answered: i64 = series.iter().map(|day| day.answered_calls).sum();
        let missed: i64 = series.iter().map(|day| day.missed_calls).sum();

        let answer_rate = percent_of(answered, total);
        let target = i64::from(target_percent);

        let mean_daily_average = if series.is_empty() {
            0
        } else {
            let sum: i64 = series
                .iter()
                .map(|day| day.average_answered_duration_seconds)
                .sum();
            (sum as f64 / series.len() as f64).round() as i64
        };

        Self {
            total_calls: total,
            answered_calls: answered,
            missed_calls: missed,
            answer_rate_percent: answer_rate,
            target_percent: target,
            delta_vs_target: answer_rate - target,
            mean_daily_average_seconds: mean_daily_average,
            peak_daily_total: series.iter().map(|day| day.total_calls).max().unwrap_or(0),
            breakdown: vec![
                CallTypeShare {
                    kind: CallKind::Answered,
                    count: answered,
                    percentage: percent_of(answered, total),
                },
                CallTypeShare {
                    kind: CallKind::Missed,
                    count: missed,
                    percentage: percent_of(missed, total),
                },
            ],
        }
    }
}
