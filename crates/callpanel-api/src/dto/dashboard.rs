//! Dashboard DTOs

use crate::dto::call::{ActiveCallsResponse, CallRecordResponse};
use crate::dto::stats::CallStatsResponse;
use callpanel_services::{DashboardSnapshot, QueryOutcome};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

/// Dashboard payload, shared by `GET /dashboard` and the WebSocket feed
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    pub day: NaiveDate,
    pub stats: QueryOutcome<CallStatsResponse>,
    pub active_calls: QueryOutcome<ActiveCallsResponse>,
    pub recent_calls: QueryOutcome<Vec<CallRecordResponse>>,
}

impl DashboardResponse {
    pub fn new(snapshot: DashboardSnapshot, tz: Tz) -> Self {
        let day = snapshot.day;
        Self {
            generation: snapshot.generation,
            generated_at: snapshot.generated_at,
            day,
            stats: snapshot.stats.map(|stats| CallStatsResponse::new(day, stats)),
            active_calls: snapshot
                .active_calls
                .map(|calls| ActiveCallsResponse::new(calls, tz)),
            recent_calls: snapshot
                .recent_calls
                .map(|calls| CallRecordResponse::from_records(calls, tz)),
        }
    }
}
