//! Fixed-offset timezone conversion for wall-clock times.
//!
//! Timezones are identified by abbreviation (`"GMT"`, `"EST"`, `"AEST"`, …)
//! and resolved through a static [`TimezoneTable`] of UTC offsets. There is no
//! DST logic: `EST` and `EDT` are separate entries, and the caller picks the
//! one in force.
//!
//! # Conversion
//!
//! A [`WallClock`] time is shifted to UTC, then to the target offset, entirely
//! in whole minutes. The result is reduced into `[00:00, 24:00)` and the number
//! of days crossed is reported as `day_offset` (negative when the target day
//! is earlier). Half-hour offsets such as `IST` (+5:30) therefore shift the
//! minute field as well as the hour.
//!
//! Unknown names resolve to offset 0 (UTC) and are logged at `warn`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::error::CalendarError;

const MINUTES_PER_DAY: i32 = 24 * 60;

/// Built-in offsets, in hours east of UTC.
const DEFAULT_OFFSETS: &[(&str, f64)] = &[
    ("UTC", 0.0),
    ("GMT", 0.0),
    ("BST", 1.0),
    ("EST", -5.0),
    ("EDT", -4.0),
    ("CST", -6.0),
    ("CDT", -5.0),
    ("MST", -7.0),
    ("MDT", -6.0),
    ("PST", -8.0),
    ("PDT", -7.0),
    ("AEST", 10.0),
    ("AEDT", 11.0),
    ("IST", 5.5),
    ("CET", 1.0),
    ("CEST", 2.0),
    ("MYT", 8.0),
];

// ── WallClock ───────────────────────────────────────────────────────────────

/// A time of day with minute precision, written `HH:MM` (24-hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallClock {
    hour: u32,
    minute: u32,
}

impl WallClock {
    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    fn minutes_since_midnight(&self) -> i32 {
        (self.hour * 60 + self.minute) as i32
    }

    fn from_minutes_since_midnight(minutes: i32) -> Self {
        let minutes = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
        Self {
            hour: minutes / 60,
            minute: minutes % 60,
        }
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for WallClock {
    type Err = CalendarError;

    /// Parses `H:MM` or `HH:MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidTime(format!("'{s}': expected HH:MM (24-hour)"));
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for WallClock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallClock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── ConvertedTime ───────────────────────────────────────────────────────────

/// A wall-clock time in the target zone plus the number of calendar days the
/// conversion crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedTime {
    pub time: WallClock,
    pub day_offset: i32,
}

impl ConvertedTime {
    /// `"Same day"`, `"Next day"` or `"Previous day"`.
    pub fn day_note(&self) -> &'static str {
        match self.day_offset {
            0 => "Same day",
            d if d > 0 => "Next day",
            _ => "Previous day",
        }
    }
}

// ── TimezoneTable ───────────────────────────────────────────────────────────

/// Static name → UTC offset table. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneTable {
    /// Upper-cased name → offset in minutes east of UTC.
    offsets: BTreeMap<String, i32>,
}

impl TimezoneTable {
    /// Build a table from `(name, offset in hours)` pairs.
    ///
    /// Offsets are rounded to the nearest minute.
    pub fn from_hours<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut table = Self {
            offsets: BTreeMap::new(),
        };
        table.extend_hours(entries);
        table
    }

    /// Add or replace entries, offsets given in hours.
    pub fn extend_hours<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (name, hours) in entries {
            self.offsets.insert(
                name.as_ref().trim().to_ascii_uppercase(),
                (hours * 60.0).round() as i32,
            );
        }
    }

    /// Offset for `name` in minutes east of UTC, if listed.
    pub fn get_minutes(&self, name: &str) -> Option<i32> {
        self.offsets.get(&name.trim().to_ascii_uppercase()).copied()
    }

    /// Offset for `name` in minutes east of UTC; unknown names resolve to 0.
    pub fn offset_minutes(&self, name: &str) -> i32 {
        self.get_minutes(name).unwrap_or_else(|| {
            warn!(timezone = name, "unknown timezone, treating as UTC");
            0
        })
    }

    /// Listed names, upper-cased, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.offsets.keys().map(String::as_str)
    }

    /// Convert `time` observed in `from` to the wall-clock time in `to`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ba_calendar::{TimezoneTable, WallClock};
    ///
    /// let table = TimezoneTable::default();
    /// let nine: WallClock = "09:00".parse().unwrap();
    /// let converted = table.convert(nine, "GMT", "EST");
    /// assert_eq!(converted.time.to_string(), "04:00");
    /// assert_eq!(converted.day_offset, 0);
    /// ```
    pub fn convert(&self, time: WallClock, from: &str, to: &str) -> ConvertedTime {
        let shifted =
            time.minutes_since_midnight() - self.offset_minutes(from) + self.offset_minutes(to);
        ConvertedTime {
            time: WallClock::from_minutes_since_midnight(shifted),
            day_offset: shifted.div_euclid(MINUTES_PER_DAY),
        }
    }
}

impl Default for TimezoneTable {
    fn default() -> Self {
        Self::from_hours(DEFAULT_OFFSETS.iter().copied())
    }
}

/// Parse `time` as `HH:MM` and convert it with `table`.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidTime`] if `time` is not a valid `HH:MM`
/// 24-hour time.
pub fn convert_timezone(
    table: &TimezoneTable,
    time: &str,
    from: &str,
    to: &str,
) -> Result<ConvertedTime, CalendarError> {
    let time: WallClock = time.parse()?;
    Ok(table.convert(time, from, to))
}
