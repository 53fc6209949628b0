//! Call history paging
//!
//! SQL-backed stores order and slice server-side. `page_of` applies the
//! same rules to records already held in memory.

use callpanel_core::{
    models::CallRecord,
    traits::{Pagination, PaginationMeta},
};
use serde::Serialize;

/// One page of call history, most recent call first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPage {
    pub records: Vec<CallRecord>,
    pub pagination: PaginationMeta,
}

impl HistoryPage {
    pub fn new(records: Vec<CallRecord>, total: i64, pagination: Pagination) -> Self {
        Self {
            records,
            pagination: PaginationMeta::new(total, pagination.page, pagination.per_page),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Slice `records` into the requested page
///
/// Records are ordered by timestamp descending, ties broken by id
/// descending. A page past the end is empty.
pub fn page_of(records: &[CallRecord], pagination: Pagination) -> HistoryPage {
    let mut ordered: Vec<&CallRecord> = records.iter().collect();
    ordered.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });

    let offset = usize::try_from(pagination.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(pagination.limit()).unwrap_or(0);

    let page = ordered
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();

    HistoryPage::new(page, records.len() as i64, pagination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn records(count: i64) -> Vec<CallRecord> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        (0..count)
            .map(|i| CallRecord {
                id: format!("{:03}", i),
                timestamp: base + Duration::minutes(i),
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_first_page_is_most_recent() {
        let page = page_of(&records(25), Pagination::new(1, 10));
        assert_eq!(page.records.len(), 10);
        assert_eq!(page.records[0].id, "024");
        assert_eq!(page.records[9].id, "015");
        assert_eq!(page.pagination.total, 25);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.first_item(), Some(1));
        assert_eq!(page.pagination.last_item(), Some(10));
    }

    #[test]
    fn test_last_partial_page() {
        let page = page_of(&records(25), Pagination::new(3, 10));
        assert_eq!(page.records.len(), 5);
        assert_eq!(page.records[4].id, "000");
        assert_eq!(page.pagination.first_item(), Some(21));
        assert_eq!(page.pagination.last_item(), Some(25));
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = page_of(&records(5), Pagination::new(4, 10));
        assert!(page.is_empty());
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.first_item(), None);
    }

    #[test]
    fn test_huge_page_number_is_empty() {
        let page = page_of(&records(5), Pagination::new(i64::MAX, 10));
        assert!(page.is_empty());
        assert_eq!(page.pagination.page, i64::MAX);
        assert_eq!(page.pagination.first_item(), None);
    }

    #[test]
    fn test_empty_store() {
        let page = page_of(&[], Pagination::new(1, 10));
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.pagination.clamp_page(7), 1);
    }

    #[test]
    fn test_ties_broken_by_id() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
        let records = vec![
            CallRecord {
                id: "a".to_string(),
                timestamp: at,
                ..Default::default()
            },
            CallRecord {
                id: "b".to_string(),
                timestamp: at,
                ..Default::default()
            },
        ];

        let page = page_of(&records, Pagination::new(1, 1));
        assert_eq!(page.records[0].id, "b");
        let page = page_of(&records, Pagination::new(2, 1));
        assert_eq!(page.records[0].id, "a");
    }
}
