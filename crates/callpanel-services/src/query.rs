//! CDR query service
//!
//! Every operation takes the caller's [`SessionContext`]; the session is
//! resolved before the query runs, so queries never touch global auth state.

use crate::aggregator::{compute_statistics, select_active};
use crate::daily_summary::build_daily_summary;
use crate::history::HistoryPage;
use crate::report::ReportOverview;
use callpanel_auth::SessionContext;
use callpanel_core::{
    calendar::{self, DayWindow},
    config::DashboardConfig,
    models::{CallRecord, CallStatistics, DailySummary},
    traits::{CallRecordFilter, CallRecordStore, Pagination},
    AppResult,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Read-side service over the call record store
pub struct CdrQueryService {
    store: Arc<dyn CallRecordStore>,
    settings: DashboardConfig,
    tz: Tz,
}

impl CdrQueryService {
    /// Create a new query service
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured timezone is unknown
    pub fn new(store: Arc<dyn CallRecordStore>, settings: DashboardConfig) -> AppResult<Self> {
        let tz = settings.tz()?;
        Ok(Self {
            store,
            settings,
            tz,
        })
    }

    pub fn settings(&self) -> &DashboardConfig {
        &self.settings
    }

    /// Timezone that defines calendar days
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Current calendar day
    pub fn today(&self) -> NaiveDate {
        calendar::today(self.tz)
    }

    /// Statistics over the calls of `day`
    #[instrument(skip(self, session), fields(extension = %session.extension_number()))]
    pub async fn today_stats(
        &self,
        session: &SessionContext,
        day: NaiveDate,
    ) -> AppResult<CallStatistics> {
        let window = DayWindow::checked(day, 1, self.tz)?;
        let filter = CallRecordFilter::between(window.from_instant(), window.until_instant());

        let records = self.store.fetch_call_records(&filter).await?;
        debug!("Computing statistics over {} records", records.len());

        Ok(compute_statistics(&records))
    }

    /// Calls inferred to be in progress
    #[instrument(skip(self, session), fields(extension = %session.extension_number()))]
    pub async fn active_calls(&self, session: &SessionContext) -> AppResult<Vec<CallRecord>> {
        let records = self
            .store
            .fetch_call_records(&CallRecordFilter::in_progress())
            .await?;

        Ok(select_active(&records))
    }

    /// One page of call history, most recent first
    #[instrument(skip(self, session), fields(extension = %session.extension_number()))]
    pub async fn history(
        &self,
        session: &SessionContext,
        page: i64,
        per_page: i64,
    ) -> AppResult<HistoryPage> {
        let pagination = Pagination::new(page, per_page);

        let (records, total) = self
            .store
            .fetch_call_records_page(pagination.offset(), pagination.limit())
            .await?;

        debug!(
            "History page {} returned {} of {} records",
            pagination.page,
            records.len(),
            total
        );

        Ok(HistoryPage::new(records, total, pagination))
    }

    /// Most recent calls for the dashboard
    pub async fn recent_calls(&self, session: &SessionContext) -> AppResult<Vec<CallRecord>> {
        let page = self
            .history(session, 1, self.settings.recent_calls_limit)
            .await?;
        Ok(page.records)
    }

    /// One summary per day of `[start_day, start_day + days)`
    #[instrument(skip(self, session), fields(extension = %session.extension_number()))]
    pub async fn daily_summary(
        &self,
        session: &SessionContext,
        start_day: NaiveDate,
        days: u32,
    ) -> AppResult<Vec<DailySummary>> {
        let window = DayWindow::checked(start_day, days, self.tz)?;
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let filter = CallRecordFilter::between(window.from_instant(), window.until_instant());
        let records = self.store.fetch_call_records(&filter).await?;

        debug!(
            "Building {} day summary from {} records",
            window.days,
            records.len()
        );

        Ok(build_daily_summary(&window, &records))
    }

    /// Report headline numbers over `[start_day, start_day + days)`
    pub async fn report_overview(
        &self,
        session: &SessionContext,
        start_day: NaiveDate,
        days: u32,
    ) -> AppResult<ReportOverview> {
        let series = self.daily_summary(session, start_day, days).await?;
        Ok(ReportOverview::from_series(
            &series,
            self.settings.answer_rate_target_percent,
        ))
    }

    /// Default summary window: the configured number of days ending today
    pub fn default_window(&self) -> DayWindow {
        DayWindow::ending_on(self.today(), self.settings.summary_days, self.tz)
    }
}

impl std::fmt::Debug for CdrQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdrQueryService")
            .field("settings", &self.settings)
            .field("tz", &self.tz)
            .finish()
    }
}
