//! Agile estimation helpers: velocity statistics, story points to hours,
//! estimation scale conversion, and requirement ID sequences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Default hours per story point.
pub const DEFAULT_POINT_TO_HOUR_RATIO: f64 = 4.0;
/// Default overhead on top of base hours (20%).
pub const DEFAULT_OVERHEAD_FACTOR: f64 = 0.2;
/// Working days in one sprint week.
const WORKING_DAYS_PER_WEEK: f64 = 5.0;
/// Hours in one working day.
const HOURS_PER_WORKING_DAY: f64 = 8.0;

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// ── Velocity ────────────────────────────────────────────────────────────────

/// Capacity adjustments applied to the historical average.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapacityAdjustments {
    /// Total person-days off in the coming sprint.
    pub days_off: f64,
    pub sprint_length: u32,
    /// Multiplier for team changes (1.0 = no change).
    pub adjustment_factor: f64,
}

impl Default for CapacityAdjustments {
    fn default() -> Self {
        Self {
            days_off: 0.0,
            sprint_length: 2,
            adjustment_factor: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityReport {
    pub historical_velocity: Vec<f64>,
    pub average_velocity: f64,
    pub adjusted_velocity: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Summarise historical velocity and project an adjusted figure for the next
/// sprint.
///
/// Each day off removes `1 / (sprint_length × 5)` of the sprint's capacity.
/// Averages are rounded to one decimal place.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `completed` is empty,
/// contains a non-finite value, or `sprint_length` is zero.
pub fn velocity_report(
    completed: &[f64],
    adjustments: &CapacityAdjustments,
) -> Result<VelocityReport, CalendarError> {
    if completed.is_empty() {
        return Err(CalendarError::InvalidArgument(
            "at least one completed sprint is required".to_string(),
        ));
    }
    if completed.iter().any(|p| !p.is_finite()) {
        return Err(CalendarError::InvalidArgument(
            "completed points must be finite numbers".to_string(),
        ));
    }
    if adjustments.sprint_length == 0 {
        return Err(CalendarError::InvalidArgument(
            "sprint length must be at least one week".to_string(),
        ));
    }

    let average = completed.iter().sum::<f64>() / completed.len() as f64;
    let holiday_impact =
        adjustments.days_off / (f64::from(adjustments.sprint_length) * WORKING_DAYS_PER_WEEK);
    let adjusted = average * adjustments.adjustment_factor * (1.0 - holiday_impact);

    let min = completed.iter().copied().fold(f64::INFINITY, f64::min);
    let max = completed.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(VelocityReport {
        historical_velocity: completed.to_vec(),
        average_velocity: round1(average),
        adjusted_velocity: round1(adjusted),
        min,
        max,
        range: max - min,
    })
}

// ── Points to hours ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursEstimate {
    pub story_points: f64,
    pub point_to_hour_ratio: f64,
    pub base_hours: f64,
    pub overhead_hours: f64,
    pub overhead_percentage: f64,
    pub total_hours: f64,
    /// Total hours expressed as 8-hour working days.
    pub working_days: f64,
}

/// Convert story points to hours, adding an overhead fraction on top.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if any input is negative or not
/// finite.
pub fn points_to_hours(
    story_points: f64,
    ratio: f64,
    overhead_factor: f64,
) -> Result<HoursEstimate, CalendarError> {
    for (name, value) in [
        ("storyPoints", story_points),
        ("pointToHourRatio", ratio),
        ("overheadFactor", overhead_factor),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(CalendarError::InvalidArgument(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }
    }

    let base = story_points * ratio;
    let overhead = base * overhead_factor;
    let total = base + overhead;

    Ok(HoursEstimate {
        story_points,
        point_to_hour_ratio: ratio,
        base_hours: round1(base),
        overhead_hours: round1(overhead),
        overhead_percentage: round1(overhead_factor * 100.0),
        total_hours: round1(total),
        working_days: round1(total / HOURS_PER_WORKING_DAY),
    })
}

// ── Estimation scales ───────────────────────────────────────────────────────

/// An estimation scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationSystem {
    Tshirt,
    Points,
    Hours,
}

impl fmt::Display for EstimationSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EstimationSystem::Tshirt => "tshirt",
            EstimationSystem::Points => "points",
            EstimationSystem::Hours => "hours",
        })
    }
}

impl FromStr for EstimationSystem {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tshirt" => Ok(EstimationSystem::Tshirt),
            "points" => Ok(EstimationSystem::Points),
            "hours" => Ok(EstimationSystem::Hours),
            other => Err(CalendarError::InvalidArgument(format!(
                "unknown estimation system '{other}'"
            ))),
        }
    }
}

/// T-shirt size, story points, hours.
const SCALE: &[(&str, u32, u32)] = &[
    ("XS", 1, 4),
    ("S", 2, 8),
    ("M", 3, 12),
    ("L", 5, 20),
    ("XL", 8, 32),
    ("XXL", 13, 52),
];

/// A value on one of the estimation scales.
///
/// Sizes serialize as JSON strings, points and hours as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EstimateValue {
    Size(String),
    Number(u32),
}

impl fmt::Display for EstimateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateValue::Size(size) => f.write_str(size),
            EstimateValue::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationConversion {
    pub original_value: EstimateValue,
    pub original_system: EstimationSystem,
    pub converted_value: EstimateValue,
    pub converted_system: EstimationSystem,
}

/// Convert `value` between estimation scales.
///
/// Supported directions: t-shirt → points, points → t-shirt, t-shirt → hours,
/// points → hours. T-shirt sizes match case-insensitively; points must be
/// one of the Fibonacci steps on the scale.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] for an unsupported direction and
/// [`CalendarError::NotFound`] if `value` is not on the source scale.
pub fn convert_estimation(
    value: &str,
    from: EstimationSystem,
    to: EstimationSystem,
) -> Result<EstimationConversion, CalendarError> {
    use EstimationSystem::*;

    let raw = value.trim();
    let row = match from {
        Tshirt => SCALE
            .iter()
            .find(|(size, _, _)| size.eq_ignore_ascii_case(raw)),
        Points => raw
            .parse::<f64>()
            .ok()
            .and_then(|p| SCALE.iter().find(|(_, points, _)| f64::from(*points) == p)),
        Hours => None,
    };

    let converted = match (from, to) {
        (Tshirt, Points) => row.map(|(_, points, _)| EstimateValue::Number(*points)),
        (Points, Tshirt) => row.map(|(size, _, _)| EstimateValue::Size(size.to_string())),
        (Tshirt, Hours) | (Points, Hours) => {
            row.map(|(_, _, hours)| EstimateValue::Number(*hours))
        }
        _ => {
            return Err(CalendarError::InvalidArgument(format!(
                "conversion from {from} to {to} not supported"
            )))
        }
    };

    let converted_value = converted.ok_or_else(|| {
        CalendarError::NotFound(format!("value {raw} not found in {from} system"))
    })?;
    let original_value = match (from, row) {
        (Points, Some((_, points, _))) => EstimateValue::Number(*points),
        _ => EstimateValue::Size(raw.to_string()),
    };

    Ok(EstimationConversion {
        original_value,
        original_system: from,
        converted_value,
        converted_system: to,
    })
}

// ── Requirement IDs ─────────────────────────────────────────────────────────

/// Widest zero padding accepted for requirement numbers.
pub const MAX_ID_PADDING: usize = 64;

/// Generate `count` sequential IDs such as `REQ-001`, `REQ-002`, …
///
/// Numbers wider than `padding` are written in full.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidArgument`] if `padding` exceeds
/// [`MAX_ID_PADDING`] or the sequence would overflow.
pub fn requirement_ids(
    prefix: &str,
    start: u64,
    count: u32,
    padding: usize,
) -> Result<Vec<String>, CalendarError> {
    if padding > MAX_ID_PADDING {
        return Err(CalendarError::InvalidArgument(format!(
            "padding {padding} exceeds the maximum of {MAX_ID_PADDING}"
        )));
    }
    if count > 0 && start.checked_add(u64::from(count) - 1).is_none() {
        return Err(CalendarError::InvalidArgument(format!(
            "{count} ids from {start} overflow the numbering range"
        )));
    }
    Ok((0..u64::from(count))
        .map(|i| format!("{}-{:0width$}", prefix, start + i, width = padding))
        .collect())
}
