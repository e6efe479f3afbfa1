//! Fiscal year and quarter resolution.
//!
//! A fiscal year begins on the first day of a configurable month (April by
//! default, matching the UK tax year) and is labelled by the two calendar
//! years it spans: a fiscal year starting April 2024 is `FY2024/25`.
//! Quarters are three-month blocks counted from the fiscal-year start.
//!
//! This module works purely on calendar dates. It does not consult the
//! working-day calendar.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::CalendarError;

/// The UK fiscal year starts in April.
pub const DEFAULT_FISCAL_YEAR_START_MONTH: u32 = 4;

/// The fiscal year and quarter containing a date.
///
/// Serialized with the labels under `fiscalYear` and `quarter`; the numeric
/// forms travel as `fiscalYearStartYear` and `quarterNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalPeriod {
    pub date: NaiveDate,
    /// Calendar year in which the fiscal year began.
    #[serde(rename = "fiscalYearStartYear")]
    pub fiscal_year: i32,
    /// e.g. `"FY2024/25"`.
    #[serde(rename = "fiscalYear")]
    pub fiscal_year_label: String,
    /// 1–4.
    #[serde(rename = "quarterNumber")]
    pub quarter: u32,
    /// e.g. `"Q1"`.
    #[serde(rename = "quarter")]
    pub quarter_label: String,
    pub quarter_start: NaiveDate,
    pub quarter_end: NaiveDate,
    pub fiscal_year_start: NaiveDate,
    pub fiscal_year_end: NaiveDate,
}

/// Resolve the fiscal period containing `date` for a fiscal year beginning
/// on the first of `fiscal_year_start_month`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `fiscal_year_start_month` is
/// outside `1..=12`, or the period boundaries fall outside the representable
/// date range.
///
/// # Examples
///
/// ```
/// use ba_calendar::resolve_fiscal_period;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let period = resolve_fiscal_period(date, 4).unwrap();
/// assert_eq!(period.fiscal_year_label, "FY2024/25");
/// assert_eq!(period.quarter_label, "Q1");
/// assert_eq!(period.quarter_end, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
/// ```
pub fn resolve_fiscal_period(
    date: NaiveDate,
    fiscal_year_start_month: u32,
) -> Result<FiscalPeriod, CalendarError> {
    if !(1..=12).contains(&fiscal_year_start_month) {
        return Err(CalendarError::InvalidArgument(format!(
            "fiscal year start month must be between 1 and 12, got {fiscal_year_start_month}"
        )));
    }

    let month = date.month();
    let fiscal_year = if month >= fiscal_year_start_month {
        date.year()
    } else {
        date.year() - 1
    };

    // Months elapsed since the fiscal year began, 0..=11.
    let offset = (month + 12 - fiscal_year_start_month) % 12;
    let quarter = offset / 3 + 1;

    let fiscal_year_start = NaiveDate::from_ymd_opt(fiscal_year, fiscal_year_start_month, 1)
        .ok_or_else(|| out_of_range(date))?;
    let quarter_start = add_months(fiscal_year_start, (quarter - 1) * 3, date)?;
    let quarter_end = last_day_before(add_months(quarter_start, 3, date)?, date)?;
    let fiscal_year_end = last_day_before(add_months(fiscal_year_start, 12, date)?, date)?;

    Ok(FiscalPeriod {
        date,
        fiscal_year,
        fiscal_year_label: format!("FY{}/{:02}", fiscal_year, (fiscal_year + 1).rem_euclid(100)),
        quarter,
        quarter_label: format!("Q{quarter}"),
        quarter_start,
        quarter_end,
        fiscal_year_start,
        fiscal_year_end,
    })
}

fn add_months(from: NaiveDate, months: u32, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    from.checked_add_months(Months::new(months))
        .ok_or_else(|| out_of_range(date))
}

fn last_day_before(first_of_next: NaiveDate, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    first_of_next.pred_opt().ok_or_else(|| out_of_range(date))
}

fn out_of_range(date: NaiveDate) -> CalendarError {
    CalendarError::InvalidArgument(format!(
        "fiscal period for {date} falls outside the supported date range"
    ))
}
