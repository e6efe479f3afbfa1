//! Sprint window generation.
//!
//! Sprints are fixed-length, contiguous and non-overlapping: sprint *i + 1*
//! begins the calendar day after sprint *i* ends. Each sprint reports how many
//! working days it contains according to the supplied [`BusinessCalendar`].

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::calendar::BusinessCalendar;
use crate::error::CalendarError;

/// One sprint window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sprint {
    /// 1-based position in the schedule.
    #[serde(rename = "sprintNumber")]
    pub number: u32,
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    /// Last day of the sprint (inclusive).
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
    #[serde(rename = "workingDays")]
    pub working_days: u32,
}

/// Generate `count` consecutive sprints of `length_weeks` weeks each,
/// the first beginning on `first_start`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `length_weeks` or `count` is
/// zero, or if the schedule runs past the last representable date.
///
/// # Examples
///
/// ```
/// use ba_calendar::{schedule_sprints, BusinessCalendar};
/// use chrono::NaiveDate;
///
/// let cal = BusinessCalendar::uk();
/// let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let sprints = schedule_sprints(&cal, start, 2, 3).unwrap();
/// assert_eq!(sprints.len(), 3);
/// assert_eq!(sprints[0].end, NaiveDate::from_ymd_opt(2025, 1, 19).unwrap());
/// assert_eq!(sprints[1].start, NaiveDate::from_ymd_opt(2025, 1, 20).unwrap());
/// ```
pub fn schedule_sprints(
    calendar: &BusinessCalendar,
    first_start: NaiveDate,
    length_weeks: u32,
    count: u32,
) -> Result<Vec<Sprint>, CalendarError> {
    if length_weeks == 0 {
        return Err(CalendarError::InvalidArgument(
            "sprint length must be at least one week".to_string(),
        ));
    }
    if count == 0 {
        return Err(CalendarError::InvalidArgument(
            "number of sprints must be at least one".to_string(),
        ));
    }

    let span = Days::new(u64::from(length_weeks) * 7 - 1);
    let mut sprints = Vec::with_capacity(count as usize);
    let mut start = first_start;

    for number in 1..=count {
        let end = start
            .checked_add_days(span)
            .ok_or_else(|| out_of_range(number))?;
        sprints.push(Sprint {
            number,
            start,
            end,
            working_days: calendar.count_working_days(start, end),
        });
        if number < count {
            start = end.succ_opt().ok_or_else(|| out_of_range(number + 1))?;
        }
    }

    Ok(sprints)
}

fn out_of_range(number: u32) -> CalendarError {
    CalendarError::InvalidArgument(format!(
        "sprint {number} ends beyond the supported date range"
    ))
}
