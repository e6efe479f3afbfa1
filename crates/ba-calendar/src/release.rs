//! Velocity-driven release date projection.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::calendar::BusinessCalendar;
use crate::error::CalendarError;

/// A projected delivery date and the effort behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseProjection {
    pub estimated_release_date: NaiveDate,
    pub sprints_needed: u32,
    pub weeks_needed: u32,
    /// Working days in `[start, estimated_release_date]`, for reporting only.
    pub working_days_needed: u32,
}

/// Project when `points_remaining` story points will be delivered at
/// `velocity` points per sprint.
///
/// The projected date advances in whole sprints of *calendar* time:
/// `start + ceil(points / velocity) × sprint_length_weeks` weeks. The
/// working-day count is derived from that date afterwards and does not feed
/// back into it.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `velocity` is not a positive
/// finite number, `points_remaining` is negative or not finite,
/// `sprint_length_weeks` is zero, or the projected date is unrepresentable.
pub fn project_release(
    calendar: &BusinessCalendar,
    start: NaiveDate,
    points_remaining: f64,
    velocity: f64,
    sprint_length_weeks: u32,
) -> Result<ReleaseProjection, CalendarError> {
    if !velocity.is_finite() || velocity <= 0.0 {
        return Err(CalendarError::InvalidArgument(format!(
            "team velocity must be greater than zero, got {velocity}"
        )));
    }
    if !points_remaining.is_finite() || points_remaining < 0.0 {
        return Err(CalendarError::InvalidArgument(format!(
            "story points remaining must be zero or more, got {points_remaining}"
        )));
    }
    if sprint_length_weeks == 0 {
        return Err(CalendarError::InvalidArgument(
            "sprint length must be at least one week".to_string(),
        ));
    }

    let sprints = (points_remaining / velocity).ceil();
    if sprints > f64::from(u32::MAX) {
        return Err(CalendarError::InvalidArgument(format!(
            "{sprints} sprints is beyond any projectable horizon"
        )));
    }
    let sprints_needed = sprints as u32;
    let weeks_needed = u64::from(sprints_needed) * u64::from(sprint_length_weeks);

    let estimated_release_date = weeks_needed
        .checked_mul(7)
        .and_then(|days| start.checked_add_days(Days::new(days)))
        .ok_or_else(|| {
            CalendarError::InvalidArgument(format!(
                "release {weeks_needed} weeks after {start} is beyond the supported date range"
            ))
        })?;

    Ok(ReleaseProjection {
        estimated_release_date,
        sprints_needed,
        weeks_needed: weeks_needed as u32,
        working_days_needed: calendar.count_working_days(start, estimated_release_date),
    })
}
