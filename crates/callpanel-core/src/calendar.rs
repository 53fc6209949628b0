//! Calendar arithmetic in the configured dashboard timezone
//!
//! Every "today", report window and per-day bucket is computed in one
//! explicit timezone; the host locale is never consulted.

use crate::{AppError, AppResult};
use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::warn;

/// Calendar day of an instant in `tz`
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Current calendar day in `tz`
pub fn today(tz: Tz) -> NaiveDate {
    local_date(Utc::now(), tz)
}

/// First instant of `day` in `tz`
///
/// Zones that skip midnight on a DST change start the day at the first
/// valid local time after it.
pub fn start_of_day(day: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => {
            warn!(%day, tz = tz.name(), "Local midnight does not exist, shifting day start");
            midnight
                .checked_add_signed(Duration::hours(1))
                .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
                .map(|local| local.with_timezone(&Utc))
                .unwrap_or_else(|| tz.from_utc_datetime(&midnight).with_timezone(&Utc))
        }
    }
}

/// A contiguous run of calendar days in one timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayWindow {
    /// First day of the window
    pub start_day: NaiveDate,

    /// Number of days covered
    pub days: u32,

    /// Timezone the days are expressed in
    #[serde(serialize_with = "serialize_tz")]
    pub tz: Tz,
}

fn serialize_tz<S: serde::Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

impl DayWindow {
    /// Window of `days` days starting at `start_day`
    pub fn new(start_day: NaiveDate, days: u32, tz: Tz) -> Self {
        Self {
            start_day,
            days,
            tz,
        }
    }

    /// Window of `days` days starting at `start_day`, rejecting days whose
    /// bounds fall outside the supported calendar
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the window or its neighbouring
    /// days cannot be represented
    pub fn checked(start_day: NaiveDate, days: u32, tz: Tz) -> AppResult<Self> {
        let representable = start_day.checked_sub_days(Days::new(1)).is_some()
            && start_day
                .checked_add_days(Days::new(u64::from(days) + 1))
                .is_some();

        if !representable {
            return Err(AppError::InvalidInput(format!(
                "Date {} is outside the supported range",
                start_day
            )));
        }

        Ok(Self::new(start_day, days, tz))
    }

    /// Window of `days` days whose last day is `last_day`
    pub fn ending_on(last_day: NaiveDate, days: u32, tz: Tz) -> Self {
        let back = u64::from(days.saturating_sub(1));
        let start_day = last_day
            .checked_sub_days(Days::new(back))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start_day, days, tz)
    }

    /// Every day of the window in ascending order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.days).map_while(move |offset| {
            self.start_day
                .checked_add_days(Days::new(u64::from(offset)))
        })
    }

    /// Day after the last day of the window, saturating at the calendar end
    pub fn end_day_exclusive(&self) -> NaiveDate {
        self.start_day
            .checked_add_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive lower bound of the window
    pub fn from_instant(&self) -> DateTime<Utc> {
        start_of_day(self.start_day, self.tz)
    }

    /// Exclusive upper bound of the window (start of the following day)
    pub fn until_instant(&self) -> DateTime<Utc> {
        start_of_day(self.end_day_exclusive(), self.tz)
    }

    /// Whether `day` belongs to the window
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start_day && day < self.end_day_exclusive()
    }

    /// Whether the window covers no day at all
    pub fn is_empty(&self) -> bool {
        self.days == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 2, 30, 0).unwrap();
        assert_eq!(local_date(instant, Tz::UTC), day(2024, 3, 10));
        assert_eq!(local_date(instant, Tz::America__Sao_Paulo), day(2024, 3, 9));
    }

    #[test]
    fn test_start_of_day_offset() {
        let start = start_of_day(day(2024, 3, 10), Tz::America__Sao_Paulo);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap());
    }

    #[test]
    fn test_window_bounds_and_dates() {
        let window = DayWindow::ending_on(day(2024, 1, 7), 7, Tz::UTC);
        assert_eq!(window.start_day, day(2024, 1, 1));
        let dates: Vec<_> = window.dates().collect();
        assert_eq!(dates.len(), 7);
        assert_eq!(dates[6], day(2024, 1, 7));
        assert_eq!(
            window.until_instant(),
            Utc.with_ymd_and_hms(2024, 1, 8, 0, 0, 0).unwrap()
        );
        assert!(window.contains(day(2024, 1, 7)));
        assert!(!window.contains(day(2024, 1, 8)));
    }

    #[test]
    fn test_empty_window() {
        let window = DayWindow::new(day(2024, 1, 1), 0, Tz::UTC);
        assert!(window.is_empty());
        assert_eq!(window.dates().count(), 0);
        assert_eq!(window.from_instant(), window.until_instant());
    }

    #[test]
    fn test_checked_window_rejects_calendar_edges() {
        let near_end: NaiveDate = "+262142-12-30".parse().unwrap();
        let result = DayWindow::checked(near_end, 7, Tz::UTC);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let result = DayWindow::checked(NaiveDate::MIN, 1, Tz::UTC);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));

        let window = DayWindow::checked(day(2024, 1, 1), 7, Tz::UTC).unwrap();
        assert_eq!(window, DayWindow::new(day(2024, 1, 1), 7, Tz::UTC));
    }

    #[test]
    fn test_window_arithmetic_saturates_at_calendar_end() {
        let window = DayWindow::new(NaiveDate::MAX, 3, Tz::UTC);
        assert_eq!(window.end_day_exclusive(), NaiveDate::MAX);
        assert_eq!(window.dates().count(), 1);

        let window = DayWindow::ending_on(NaiveDate::MIN, 3, Tz::UTC);
        assert_eq!(window.start_day, NaiveDate::MIN);
    }
}
