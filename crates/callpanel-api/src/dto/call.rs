//! Call record DTOs

use callpanel_core::{
    format::{format_date_time, format_duration},
    models::CallRecord,
    traits::PaginationMeta,
};
use callpanel_services::HistoryPage;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Call record as shown in tables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallRecordResponse {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// `dd/mm/yy HH:MM` in the dashboard timezone
    pub timestamp_display: String,
    pub source: String,
    pub destination: String,
    pub duration_seconds: i64,
    /// `m:ss`
    pub duration_display: String,
    pub disposition: Option<String>,
    pub answered: bool,
    pub last_application: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_field: Option<String>,
}

impl CallRecordResponse {
    pub fn from_record(record: CallRecord, tz: Tz) -> Self {
        Self {
            timestamp_display: format_date_time(record.timestamp, tz),
            duration_seconds: record.duration(),
            duration_display: format_duration(record.duration_seconds),
            answered: record.is_answered(),
            disposition: record.disposition.as_ref().map(|d| d.as_str().to_string()),
            id: record.id,
            timestamp: record.timestamp,
            source: record.source,
            destination: record.destination,
            last_application: record.last_application,
            user_field: record.user_field,
        }
    }

    pub fn from_records(records: Vec<CallRecord>, tz: Tz) -> Vec<Self> {
        records
            .into_iter()
            .map(|record| Self::from_record(record, tz))
            .collect()
    }
}

/// Calls believed to be in progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveCallsResponse {
    /// Always true: derived from `lastapp = Dial` with no disposition,
    /// not from live PBX state
    pub inferred: bool,
    pub count: usize,
    pub calls: Vec<CallRecordResponse>,
}

impl ActiveCallsResponse {
    pub fn new(records: Vec<CallRecord>, tz: Tz) -> Self {
        let calls = CallRecordResponse::from_records(records, tz);
        Self {
            inferred: true,
            count: calls.len(),
            calls,
        }
    }
}

/// One page of call history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallHistoryResponse {
    pub data: Vec<CallRecordResponse>,
    pub pagination: PaginationMeta,
    /// "Showing X to Y of Z", absent for an empty page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showing: Option<ShowingRange>,
}

/// 1-based item range displayed by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowingRange {
    pub from: i64,
    pub to: i64,
    pub total: i64,
}

impl CallHistoryResponse {
    pub fn new(page: HistoryPage, tz: Tz) -> Self {
        let pagination = page.pagination;
        let showing = pagination
            .first_item()
            .zip(pagination.last_item())
            .map(|(from, to)| ShowingRange {
                from,
                to,
                total: pagination.total,
            });

        Self {
            data: CallRecordResponse::from_records(page.records, tz),
            pagination,
            showing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callpanel_core::{models::Disposition, traits::Pagination};
    use chrono::TimeZone;

    fn record() -> CallRecord {
        CallRecord {
            id: "1709640000.7".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 12, 7, 0).unwrap(),
            source: "2001".to_string(),
            destination: "5511999998888".to_string(),
            duration_seconds: Some(125),
            disposition: Some(Disposition::Answered),
            last_application: "Dial".to_string(),
            user_field: None,
        }
    }

    #[test]
    fn test_call_record_response() {
        let response = CallRecordResponse::from_record(record(), chrono_tz::America::Sao_Paulo);

        assert_eq!(response.duration_display, "2:05");
        assert_eq!(response.timestamp_display, "05/03/24 09:07");
        assert_eq!(response.disposition.as_deref(), Some("ANSWERED"));
        assert!(response.answered);
    }

    #[test]
    fn test_active_calls_are_flagged_inferred() {
        let active = CallRecord {
            disposition: None,
            duration_seconds: None,
            ..record()
        };

        let response = ActiveCallsResponse::new(vec![active], chrono_tz::UTC);
        assert!(response.inferred);
        assert_eq!(response.count, 1);
        assert_eq!(response.calls[0].duration_display, "0:00");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["inferred"], true);
    }

    #[test]
    fn test_history_showing_range() {
        let page = HistoryPage::new(vec![record(); 5], 25, Pagination::new(3, 10));
        let response = CallHistoryResponse::new(page, chrono_tz::UTC);

        assert_eq!(
            response.showing,
            Some(ShowingRange {
                from: 21,
                to: 25,
                total: 25
            })
        );

        let empty = HistoryPage::new(Vec::new(), 25, Pagination::new(9, 10));
        assert_eq!(CallHistoryResponse::new(empty, chrono_tz::UTC).showing, None);
    }
}
