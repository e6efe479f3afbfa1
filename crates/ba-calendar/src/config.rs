//! Engine configuration.
//!
//! Settings come from an optional TOML document, then environment variables
//! override individual scalars:
//!
//! | TOML key                      | Environment variable      | Default |
//! |-------------------------------|---------------------------|---------|
//! | `fiscal_year_start_month`     | `FISCAL_YEAR_START_MONTH` | 4       |
//! | `default_sprint_length_weeks` | `DEFAULT_SPRINT_LENGTH`   | 2       |
//! | `point_to_hour_ratio`         | `POINT_TO_HOUR_RATIO`     | 4.0     |
//! | `overhead_factor`             | `OVERHEAD_FACTOR`         | 0.2     |
//!
//! `holidays` replaces the built-in UK bank-holiday table when present, and
//! `[timezones]` adds to or overrides the built-in offsets (in hours).

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::agile::{DEFAULT_OVERHEAD_FACTOR, DEFAULT_POINT_TO_HOUR_RATIO};
use crate::calendar::HolidaySet;
use crate::error::CalendarError;
use crate::fiscal::DEFAULT_FISCAL_YEAR_START_MONTH;
use crate::timezone::TimezoneTable;

pub const ENV_FISCAL_YEAR_START_MONTH: &str = "FISCAL_YEAR_START_MONTH";
pub const ENV_DEFAULT_SPRINT_LENGTH: &str = "DEFAULT_SPRINT_LENGTH";
pub const ENV_POINT_TO_HOUR_RATIO: &str = "POINT_TO_HOUR_RATIO";
pub const ENV_OVERHEAD_FACTOR: &str = "OVERHEAD_FACTOR";

/// Largest accepted timezone offset, in hours either side of UTC.
const MAX_OFFSET_HOURS: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default = "default_fiscal_year_start_month")]
    pub fiscal_year_start_month: u32,
    #[serde(default = "default_sprint_length_weeks")]
    pub default_sprint_length_weeks: u32,
    #[serde(default = "default_point_to_hour_ratio")]
    pub point_to_hour_ratio: f64,
    #[serde(default = "default_overhead_factor")]
    pub overhead_factor: f64,
    /// ISO dates. Replaces the built-in holiday table when set.
    #[serde(default)]
    pub holidays: Option<Vec<String>>,
    /// Extra or overriding offsets, in hours east of UTC.
    #[serde(default)]
    pub timezones: BTreeMap<String, f64>,
}

fn default_fiscal_year_start_month() -> u32 {
    DEFAULT_FISCAL_YEAR_START_MONTH
}
fn default_sprint_length_weeks() -> u32 {
    2
}
fn default_point_to_hour_ratio() -> f64 {
    DEFAULT_POINT_TO_HOUR_RATIO
}
fn default_overhead_factor() -> f64 {
    DEFAULT_OVERHEAD_FACTOR
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fiscal_year_start_month: default_fiscal_year_start_month(),
            default_sprint_length_weeks: default_sprint_length_weeks(),
            point_to_hour_ratio: default_point_to_hour_ratio(),
            overhead_factor: default_overhead_factor(),
            holidays: None,
            timezones: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, CalendarError> {
        toml::from_str(s).map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] naming the variable if a value does
    /// not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), CalendarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, ENV_FISCAL_YEAR_START_MONTH, &mut self.fiscal_year_start_month)?;
        override_from(&lookup, ENV_DEFAULT_SPRINT_LENGTH, &mut self.default_sprint_length_weeks)?;
        override_from(&lookup, ENV_POINT_TO_HOUR_RATIO, &mut self.point_to_hour_ratio)?;
        override_from(&lookup, ENV_OVERHEAD_FACTOR, &mut self.overhead_factor)?;
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), CalendarError> {
        if !(1..=12).contains(&self.fiscal_year_start_month) {
            return Err(CalendarError::Config(format!(
                "fiscal_year_start_month must be between 1 and 12, got {}",
                self.fiscal_year_start_month
            )));
        }
        if self.default_sprint_length_weeks == 0 {
            return Err(CalendarError::Config(
                "default_sprint_length_weeks must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("point_to_hour_ratio", self.point_to_hour_ratio),
            ("overhead_factor", self.overhead_factor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalendarError::Config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        for (zone, hours) in &self.timezones {
            if !hours.is_finite() || hours.abs() > MAX_OFFSET_HOURS {
                return Err(CalendarError::Config(format!(
                    "timezone {zone} offset must be within ±{MAX_OFFSET_HOURS} hours, got {hours}"
                )));
            }
        }
        Ok(())
    }

    /// The configured holiday set, or the built-in UK table.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Config`] if a configured holiday is not an
    /// ISO date.
    pub fn holiday_set(&self) -> Result<HolidaySet, CalendarError> {
        match &self.holidays {
            Some(dates) => HolidaySet::from_iso_strings(dates)
                .map_err(|e| CalendarError::Config(format!("holidays: {e}"))),
            None => Ok(HolidaySet::uk_bank_holidays()),
        }
    }

    /// The built-in timezone table with configured entries applied.
    pub fn timezone_table(&self) -> TimezoneTable {
        let mut table = TimezoneTable::default();
        table.extend_hours(self.timezones.iter().map(|(name, hours)| (name, *hours)));
        table
    }
}

fn override_from<T, F>(lookup: &F, var: &str, slot: &mut T) -> Result<(), CalendarError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(());
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(());
    }
    *slot = raw
        .parse()
        .map_err(|e| CalendarError::Config(format!("{var}={raw:?}: {e}")))?;
    debug!(var, value = raw, "environment override applied");
    Ok(())
}
