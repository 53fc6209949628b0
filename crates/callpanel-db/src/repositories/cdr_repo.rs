//! Call record store over the PBX `cdr` table
//!
//! Read-only access with date range filtering, in-progress predicates and
//! most-recent-first paging. Uses runtime queries (not compile-time macros)
//! to avoid requiring a database connection at build time.

use callpanel_core::{
    models::{CallRecord, Disposition},
    traits::{CallRecordFilter, CallRecordStore, DispositionFilter},
    AppError, AppResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, error, instrument};

/// PostgreSQL implementation of CallRecordStore
#[derive(Clone)]
pub struct PgCallRecordStore {
    pool: PgPool,
}

impl PgCallRecordStore {
    /// Create a new call record store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CDR_SELECT_COLUMNS: &str = r#"
    uniqueid, calldate, src, dst,
    duration, disposition, lastapp, userfield
"#;

/// Append the WHERE clause for `filter` to `builder`
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &CallRecordFilter) {
    builder.push(" WHERE TRUE");

    if let Some(from) = filter.from {
        builder.push(" AND calldate >= ").push_bind(from);
    }

    if let Some(until) = filter.until {
        builder.push(" AND calldate < ").push_bind(until);
    }

    if let Some(app) = &filter.last_application {
        builder.push(" AND lastapp = ").push_bind(app.clone());
    }

    match &filter.disposition {
        DispositionFilter::Any => {}
        DispositionFilter::Absent => {
            builder.push(" AND (disposition IS NULL OR disposition = '')");
        }
        DispositionFilter::Equals(code) => {
            builder.push(" AND disposition = ").push_bind(code.clone());
        }
    }
}

#[async_trait]
impl CallRecordStore for PgCallRecordStore {
    #[instrument(skip(self))]
    async fn fetch_call_records(&self, filter: &CallRecordFilter) -> AppResult<Vec<CallRecord>> {
        debug!("Fetching call records");

        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM cdr",
            CDR_SELECT_COLUMNS
        ));
        push_filter(&mut builder, filter);

        let rows = builder
            .build_query_as::<CdrRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error fetching call records: {}", e);
                AppError::Database(format!("Failed to fetch call records: {}", e))
            })?;

        debug!("Fetched {} call records", rows.len());

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn fetch_call_records_page(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<CallRecord>, i64)> {
        debug!("Fetching call history with limit {} offset {}", limit, offset);

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cdr")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error counting call records: {}", e);
                AppError::Database(format!("Failed to count call records: {}", e))
            })?;

        // uniqueid breaks ties so consecutive pages never overlap
        let query = format!(
            "SELECT {} FROM cdr ORDER BY calldate DESC, uniqueid DESC LIMIT $1 OFFSET $2",
            CDR_SELECT_COLUMNS
        );

        let rows = sqlx::query_as::<Postgres, CdrRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Database error fetching call history: {}", e);
                AppError::Database(format!("Failed to fetch call history: {}", e))
            })?;

        Ok((rows.into_iter().map(Into::into).collect(), total.0))
    }
}

/// Helper struct for mapping database rows to domain model
#[derive(Debug, sqlx::FromRow)]
struct CdrRow {
    uniqueid: String,
    calldate: DateTime<Utc>,
    src: Option<String>,
    dst: Option<String>,
    duration: Option<i32>,
    disposition: Option<String>,
    lastapp: Option<String>,
    userfield: Option<String>,
}

impl From<CdrRow> for CallRecord {
    fn from(row: CdrRow) -> Self {
        Self {
            id: row.uniqueid,
            timestamp: row.calldate,
            source: row.src.unwrap_or_default(),
            destination: row.dst.unwrap_or_default(),
            duration_seconds: row.duration.map(|d| i64::from(d).max(0)),
            disposition: Disposition::from_raw(row.disposition.as_deref()),
            last_application: row.lastapp.unwrap_or_default(),
            user_field: row.userfield.filter(|field| !field.is_empty()),
        }
    }
}
