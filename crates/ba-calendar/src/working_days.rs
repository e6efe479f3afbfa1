//! Working-day arithmetic over a [`BusinessCalendar`].
//!
//! All three operations walk the calendar one day at a time. The walks are
//! bounded by the requested span (counting) or the requested number of
//! working days (stepping), so cost is linear and always finite.
//!
//! # Off-by-one policy
//!
//! - [`BusinessCalendar::count_working_days`] is inclusive of both ends.
//! - [`BusinessCalendar::add_working_days`] never counts the start date itself:
//!   the first candidate is the day after `start`. `n = 0` returns `start`
//!   unchanged, even when `start` is not a working day.
//!
//! Together these give, for every date `d` and `n ≥ 0`:
//!
//! ```text
//! count_working_days(d, add_working_days(d, n)) == n + (is_working_day(d) as u32)
//! ```

use std::iter;

use chrono::NaiveDate;
use tracing::trace;

use crate::calendar::BusinessCalendar;
use crate::error::CalendarError;

impl BusinessCalendar {
    /// Count working days in `[start, end]`, inclusive of both ends.
    ///
    /// A reversed range (`start > end`) is empty and counts 0; it is not an
    /// error.
    ///
    /// # Examples
    ///
    /// ```
    /// use ba_calendar::BusinessCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let cal = BusinessCalendar::uk();
    /// let mon = NaiveDate::from_ymd_opt(2024, 12, 23).unwrap();
    /// let fri = NaiveDate::from_ymd_opt(2024, 12, 27).unwrap();
    /// // Christmas and Boxing Day are bank holidays.
    /// assert_eq!(cal.count_working_days(mon, fri), 3);
    /// ```
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        if start > end {
            return 0;
        }
        let count = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_working_day(*d))
            .count();
        trace!(%start, %end, count, "counted working days");
        count as u32
    }

    /// Step forward from `start` until `n` working days have been passed.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidArgument`] if the walk runs past the
    /// last representable date.
    pub fn add_working_days(&self, start: NaiveDate, n: u32) -> Result<NaiveDate, CalendarError> {
        self.step_working_days(start, n, NaiveDate::succ_opt)
    }

    /// Step backward from `start` until `n` working days have been passed.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidArgument`] if the walk runs past the
    /// first representable date.
    pub fn subtract_working_days(
        &self,
        start: NaiveDate,
        n: u32,
    ) -> Result<NaiveDate, CalendarError> {
        self.step_working_days(start, n, NaiveDate::pred_opt)
    }

    fn step_working_days(
        &self,
        start: NaiveDate,
        n: u32,
        step: fn(&NaiveDate) -> Option<NaiveDate>,
    ) -> Result<NaiveDate, CalendarError> {
        if n == 0 {
            return Ok(start);
        }
        iter::successors(step(&start), step)
            .filter(|d| self.is_working_day(*d))
            .nth(n as usize - 1)
            .ok_or_else(|| {
                CalendarError::InvalidArgument(format!(
                    "stepping {n} working days from {start} leaves the supported date range"
                ))
            })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidaySet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── count_working_days tests ────────────────────────────────────────

    #[test]
    fn test_count_christmas_week() {
        let cal = BusinessCalendar::uk();
        // Mon 23, Tue 24 and Fri 27 work; 25th and 26th are holidays.
        assert_eq!(cal.count_working_days(date(2024, 12, 23), date(2024, 12, 27)), 3);
    }

    #[test]
    fn test_count_padding_weekends_changes_nothing() {
        let cal = BusinessCalendar::uk();
        assert_eq!(cal.count_working_days(date(2024, 12, 21), date(2024, 12, 29)), 3);
    }

    #[test]
    fn test_count_with_christmas_eve_closure() {
        let holidays =
            HolidaySet::from_iso_strings(["2024-12-24", "2024-12-25", "2024-12-26"]).unwrap();
        let cal = BusinessCalendar::new(holidays);
        assert_eq!(cal.count_working_days(date(2024, 12, 23), date(2024, 12, 27)), 2);
    }

    #[test]
    fn test_count_single_day() {
        let cal = BusinessCalendar::uk();
        assert_eq!(cal.count_working_days(date(2024, 6, 10), date(2024, 6, 10)), 1);
        assert_eq!(cal.count_working_days(date(2024, 6, 8), date(2024, 6, 8)), 0);
    }

    #[test]
    fn test_count_full_weeks_without_holidays() {
        let cal = BusinessCalendar::new(HolidaySet::empty());
        assert_eq!(cal.count_working_days(date(2024, 6, 3), date(2024, 6, 30)), 20);
    }

    #[test]
    fn test_count_reversed_range_is_zero() {
        let cal = BusinessCalendar::uk();
        assert_eq!(cal.count_working_days(date(2024, 6, 30), date(2024, 6, 3)), 0);
    }

    // ── add_working_days tests ──────────────────────────────────────────

    #[test]
    fn test_add_zero_returns_start() {
        let cal = BusinessCalendar::uk();
        let sat = date(2024, 6, 8);
        assert_eq!(cal.add_working_days(sat, 0).unwrap(), sat);
    }

    #[test]
    fn test_add_skips_weekend() {
        let cal = BusinessCalendar::uk();
        // Friday + 1 working day = Monday
        assert_eq!(cal.add_working_days(date(2024, 6, 7), 1).unwrap(), date(2024, 6, 10));
    }

    #[test]
    fn test_add_skips_holidays() {
        let cal = BusinessCalendar::uk();
        // Tue 24 Dec + 1 = Fri 27 Dec
        assert_eq!(
            cal.add_working_days(date(2024, 12, 24), 1).unwrap(),
            date(2024, 12, 27)
        );
        // Fri 27 Dec: Mon 30, Tue 31, then New Year's Day is skipped
        assert_eq!(
            cal.add_working_days(date(2024, 12, 27), 2).unwrap(),
            date(2024, 12, 31)
        );
        assert_eq!(
            cal.add_working_days(date(2024, 12, 27), 3).unwrap(),
            date(2025, 1, 2)
        );
    }

    #[test]
    fn test_add_from_weekend_counts_from_next_day() {
        let cal = BusinessCalendar::uk();
        assert_eq!(cal.add_working_days(date(2024, 6, 8), 1).unwrap(), date(2024, 6, 10));
    }

    #[test]
    fn test_add_past_max_date_is_error() {
        let cal = BusinessCalendar::uk();
        let err = cal.add_working_days(NaiveDate::MAX, 1).unwrap_err();
        assert!(matches!(err, CalendarError::InvalidArgument(_)));
    }

    // ── subtract_working_days tests ─────────────────────────────────────

    #[test]
    fn test_subtract_skips_weekend() {
        let cal = BusinessCalendar::uk();
        // Monday - 1 working day = Friday
        assert_eq!(
            cal.subtract_working_days(date(2024, 6, 10), 1).unwrap(),
            date(2024, 6, 7)
        );
    }

    #[test]
    fn test_subtract_skips_easter() {
        let cal = BusinessCalendar::uk();
        // Tue 2 Apr 2024 - 1 = Thu 28 Mar (Easter Monday and Good Friday skipped)
        assert_eq!(
            cal.subtract_working_days(date(2024, 4, 2), 1).unwrap(),
            date(2024, 3, 28)
        );
    }

    #[test]
    fn test_subtract_zero_returns_start() {
        let cal = BusinessCalendar::uk();
        assert_eq!(
            cal.subtract_working_days(date(2024, 12, 25), 0).unwrap(),
            date(2024, 12, 25)
        );
    }

    #[test]
    fn test_subtract_past_min_date_is_error() {
        let cal = BusinessCalendar::uk();
        assert!(cal.subtract_working_days(NaiveDate::MIN, 3).is_err());
    }

    #[test]
    fn test_add_then_subtract_round_trip_on_working_day() {
        let cal = BusinessCalendar::uk();
        let start = date(2025, 3, 3);
        let forward = cal.add_working_days(start, 17).unwrap();
        assert_eq!(cal.subtract_working_days(forward, 17).unwrap(), start);
    }
}
