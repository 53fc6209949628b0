//! Statistics aggregation and active-call selection
//!
//! Both functions are pure: they look only at the records handed in and
//! do no filtering beyond the answered / in-progress checks.

use callpanel_core::models::{CallRecord, CallStatistics};

/// Compute the day statistics for `records`
///
/// The caller restricts `records` to the day of interest. The average is
/// taken over answered calls only.
///
/// # Examples
///
/// ```
/// use callpanel_core::models::{CallRecord, Disposition};
/// use callpanel_services::compute_statistics;
///
/// let records = vec![CallRecord {
///     duration_seconds: Some(60),
///     disposition: Some(Disposition::Answered),
///     ..Default::default()
/// }];
/// let stats = compute_statistics(&records);
/// assert_eq!(stats.answered_calls, 1);
/// assert_eq!(stats.average_answered_duration_seconds, 60.0);
/// ```
pub fn compute_statistics(records: &[CallRecord]) -> CallStatistics {
    let mut answered = 0_i64;
    let mut active = 0_i64;
    let mut answered_duration = 0_i64;

    for record in records {
        if record.is_answered() {
            answered += 1;
            answered_duration += record.duration();
        }
        if record.is_active() {
            active += 1;
        }
    }

    let total = records.len() as i64;

    CallStatistics {
        total_calls: total,
        answered_calls: answered,
        missed_calls: total - answered,
        active_calls: active,
        average_answered_duration_seconds: answered_duration as f64 / answered.max(1) as f64,
    }
}

/// Records that look like calls in progress, in input order
pub fn select_active(records: &[CallRecord]) -> Vec<CallRecord> {
    records
        .iter()
        .filter(|record| record.is_active())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use callpanel_core::models::Disposition;

    fn record(id: &str, disposition: Option<&str>, duration: i64, app: &str) -> CallRecord {
        CallRecord {
            id: id.to_string(),
            duration_seconds: Some(duration),
            disposition: Disposition::from_raw(disposition),
            last_application: app.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, CallStatistics::default());
        assert_eq!(stats.average_answered_duration_seconds, 0.0);
    }

    #[test]
    fn test_mixed_day() {
        let records = vec![
            record("1", Some("ANSWERED"), 60, "Dial"),
            record("2", Some("NO ANSWER"), 0, "Dial"),
            record("3", None, 0, "Dial"),
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.total_calls, 3);
        assert_eq!(stats.answered_calls, 1);
        assert_eq!(stats.missed_calls, 2);
        assert_eq!(stats.active_calls, 1);
        assert_eq!(stats.average_answered_duration_seconds, 60.0);
    }

    #[test]
    fn test_unanswered_durations_ignored() {
        let records = vec![
            record("1", Some("ANSWERED"), 30, "Dial"),
            record("2", Some("ANSWERED"), 45, "Dial"),
            record("3", Some("BUSY"), 500, "Dial"),
        ];

        let stats = compute_statistics(&records);
        assert_eq!(stats.average_answered_duration_seconds, 37.5);
    }

    #[test]
    fn test_select_active_preserves_order() {
        let records = vec![
            record("a", None, 0, "Dial"),
            record("b", Some("ANSWERED"), 10, "Dial"),
            record("c", None, 0, "Queue"),
            record("d", Some(""), 0, "Dial"),
        ];

        let active = select_active(&records);
        let ids: Vec<_> = active.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);

        assert_eq!(select_active(&active), active);
    }
}
