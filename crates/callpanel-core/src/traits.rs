//! Common traits for stores and pagination
//!
//! Defines the abstractions the aggregation layer consumes. The record
//! store and the extension registry are remote; these traits are the only
//! surface the rest of the workspace sees.

use crate::error::AppError;
use crate::models::{CallRecord, Extension};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Predicate on the disposition column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DispositionFilter {
    /// No constraint
    #[default]
    Any,
    /// Disposition must be absent (NULL or empty)
    Absent,
    /// Disposition must equal the given code
    Equals(String),
}

/// Filter for call record queries
///
/// Time bounds are `[from, until)`. All set predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallRecordFilter {
    /// Inclusive lower bound on the call timestamp
    pub from: Option<DateTime<Utc>>,

    /// Exclusive upper bound on the call timestamp
    pub until: Option<DateTime<Utc>>,

    /// Required last application
    pub last_application: Option<String>,

    /// Disposition predicate
    pub disposition: DispositionFilter,
}

impl CallRecordFilter {
    /// Calls started in `[from, until)`
    pub fn between(from: DateTime<Utc>, until: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            until: Some(until),
            ..Default::default()
        }
    }

    /// Calls still dialing with no outcome recorded
    pub fn in_progress() -> Self {
        Self {
            last_application: Some(crate::models::DIAL_APPLICATION.to_string()),
            disposition: DispositionFilter::Absent,
            ..Default::default()
        }
    }

    /// Check a record against the filter
    ///
    /// Mirrors what SQL-backed stores evaluate server-side.
    pub fn matches(&self, record: &CallRecord) -> bool {
        if self.from.is_some_and(|from| record.timestamp < from) {
            return false;
        }
        if self.until.is_some_and(|until| record.timestamp >= until) {
            return false;
        }
        if let Some(app) = &self.last_application {
            if &record.last_application != app {
                return false;
            }
        }
        match &self.disposition {
            DispositionFilter::Any => true,
            DispositionFilter::Absent => record.disposition.is_none(),
            DispositionFilter::Equals(code) => record
                .disposition
                .as_ref()
                .is_some_and(|d| d.as_str() == code),
        }
    }
}

/// Remote table of call records
#[async_trait]
pub trait CallRecordStore: Send + Sync {
    /// Fetch every record matching `filter`, in store order
    async fn fetch_call_records(&self, filter: &CallRecordFilter)
        -> Result<Vec<CallRecord>, AppError>;

    /// Fetch `limit` records starting at `offset`, most recent first,
    /// together with the total record count
    async fn fetch_call_records_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<CallRecord>, i64), AppError>;
}

/// Registry of extensions allowed to log in
#[async_trait]
pub trait ExtensionDirectory: Send + Sync {
    /// Find extension by its number
    async fn find_by_number(&self, number: &str) -> Result<Option<Extension>, AppError>;
}

/// Pagination parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, 1000),
        }
    }

    /// Rows to skip, saturating for pages far past the end
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = if per_page > 0 {
            (total + per_page - 1) / per_page
        } else {
            0
        };

        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }

    /// Bring `page` into `[1, max(total_pages, 1)]`
    pub fn clamp_page(&self, page: i64) -> i64 {
        page.clamp(1, self.total_pages.max(1))
    }

    /// 1-based position of the first item shown on this page
    pub fn first_item(&self) -> Option<i64> {
        let first = (self.page - 1)
            .saturating_mul(self.per_page)
            .saturating_add(1);
        (first <= self.total).then_some(first)
    }

    /// 1-based position of the last item shown on this page
    pub fn last_item(&self) -> Option<i64> {
        self.first_item()
            .map(|_| self.page.saturating_mul(self.per_page).min(self.total))
    }
}
