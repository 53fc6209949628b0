//! Daily summary series
//!
//! Buckets call records by their calendar day in the window's timezone.

use callpanel_core::{
    calendar::{local_date, DayWindow},
    models::{CallRecord, DailySummary},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Default)]
struct DayAccumulator {
    total: i64,
    answered: i64,
    answered_duration: i64,
}

impl DayAccumulator {
    fn add(&mut self, record: &CallRecord) {
        self.total += 1;
        if record.is_answered() {
            self.answered += 1;
            self.answered_duration += record.duration();
        }
    }

    fn finish(self, date: NaiveDate) -> DailySummary {
        let average = if self.answered > 0 {
            (self.answered_duration as f64 / self.answered as f64).round() as i64
        } else {
            0
        };

        DailySummary {
            date,
            total_calls: self.total,
            answered_calls: self.answered,
            missed_calls: self.total - self.answered,
            average_answered_duration_seconds: average,
        }
    }
}

/// Build one summary per day of `window`, ascending
///
/// Days without calls are zero-valued. Records outside the window are
/// dropped. The result does not depend on the order of `records`.
///
/// # Examples
///
/// ```
/// use callpanel_core::calendar::DayWindow;
/// use callpanel_services::build_daily_summary;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let window = DayWindow::new(start, 7, chrono_tz::UTC);
/// let series = build_daily_summary(&window, &[]);
/// assert_eq!(series.len(), 7);
/// assert!(series.iter().all(|day| day.total_calls == 0));
/// ```
pub fn build_daily_summary(window: &DayWindow, records: &[CallRecord]) -> Vec<DailySummary> {
    let mut buckets: BTreeMap<NaiveDate, DayAccumulator> = window
        .dates()
        .map(|date| (date, DayAccumulator::default()))
        .collect();

    for record in records {
        let day = local_date(record.timestamp, window.tz);
        if let Some(bucket) = buckets.get_mut(&day) {
            bucket.add(record);
        }
    }

    buckets
        .into_iter()
        .map(|(date, bucket)| bucket.finish(date))
        .collect()
}
