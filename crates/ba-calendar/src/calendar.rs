//! Working-day calendar: weekend rule plus a static holiday table.
//!
//! A [`BusinessCalendar`] answers one question, "is this date a working
//! day?", and everything else in the crate that walks dates builds on it.
//! The holiday table is immutable once constructed and shared behind an
//! [`Arc`], so a calendar is cheap to clone and safe to use from any thread.
//!
//! The built-in table ([`HolidaySet::uk_bank_holidays`]) covers England & Wales
//! bank holidays for 2024–2026. Deployments that need another region supply
//! their own dates through configuration (see [`crate::config`]).

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::CalendarError;

/// England & Wales bank holidays, 2024–2026.
const UK_BANK_HOLIDAYS: &[(i32, u32, u32)] = &[
    // 2024
    (2024, 1, 1),
    (2024, 3, 29),
    (2024, 4, 1),
    (2024, 5, 6),
    (2024, 5, 27),
    (2024, 8, 26),
    (2024, 12, 25),
    (2024, 12, 26),
    // 2025
    (2025, 1, 1),
    (2025, 4, 18),
    (2025, 4, 21),
    (2025, 5, 5),
    (2025, 5, 26),
    (2025, 8, 25),
    (2025, 12, 25),
    (2025, 12, 26),
    // 2026
    (2026, 1, 1),
    (2026, 4, 3),
    (2026, 4, 6),
    (2026, 5, 4),
    (2026, 5, 25),
    (2026, 8, 31),
    (2026, 12, 25),
    (2026, 12, 28),
];

// ── HolidaySet ──────────────────────────────────────────────────────────────

/// An ordered, immutable set of non-working calendar dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// An empty table: only weekends are non-working.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in England & Wales bank holiday table.
    pub fn uk_bank_holidays() -> Self {
        UK_BANK_HOLIDAYS
            .iter()
            .filter_map(|&(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .collect()
    }

    /// Build a table from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] for the first entry that is not a
    /// valid ISO calendar date.
    pub fn from_iso_strings<I, S>(dates: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        dates
            .into_iter()
            .map(|s| parse_date(s.as_ref()))
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|dates| Self { dates })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays falling within `[start, end]`, in date order.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> + '_ {
        let range = if start <= end {
            Some(start..=end)
        } else {
            None
        };
        range
            .into_iter()
            .flat_map(move |r| self.dates.range(r).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

// ── BusinessCalendar ────────────────────────────────────────────────────────

/// Weekend rule (Saturday/Sunday) combined with a shared holiday table.
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    holidays: Arc<HolidaySet>,
}

impl BusinessCalendar {
    pub fn new(holidays: HolidaySet) -> Self {
        Self {
            holidays: Arc::new(holidays),
        }
    }

    /// A calendar over the built-in UK bank holiday table.
    pub fn uk() -> Self {
        Self::new(HolidaySet::uk_bank_holidays())
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Whether `date` is a working day: not a Saturday or Sunday, and not a
    /// listed holiday.
    ///
    /// # Examples
    ///
    /// ```
    /// use ba_calendar::BusinessCalendar;
    /// use chrono::NaiveDate;
    ///
    /// let cal = BusinessCalendar::uk();
    /// let christmas = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    /// assert!(!cal.is_working_day(christmas));
    /// ```
    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        !is_weekend(date) && !self.holidays.contains(date)
    }
}

impl Default for BusinessCalendar {
    fn default() -> Self {
        Self::uk()
    }
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`CalendarError::InvalidDate`] if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| CalendarError::InvalidDate(format!("'{}': {}", s, e)))
}

// ── Tests ───────────────────────────────────────────────────────────────────
