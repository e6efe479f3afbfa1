//! Cross-timezone meeting slot search.
//!
//! The search is a linear scan over whole-hour candidates in a base timezone
//! (by default 08:00–18:00 GMT, eleven slots). Each candidate is converted
//! into every participant's zone and kept only if it lands inside everyone's
//! availability window on the same calendar day. Availability windows have
//! hour granularity, so half-hour solutions are never proposed.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::timezone::{TimezoneTable, WallClock};

/// Someone who needs to attend, and the local hours they can do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub name: String,
    pub timezone: String,
    /// `[first, last]` local hour, inclusive at both ends.
    pub available_hours: [u32; 2],
}

impl Participant {
    pub fn new(name: impl Into<String>, timezone: impl Into<String>, from: u32, to: u32) -> Self {
        Self {
            name: name.into(),
            timezone: timezone.into(),
            available_hours: [from, to],
        }
    }

    fn is_available_at(&self, hour: u32) -> bool {
        let [from, to] = self.available_hours;
        from <= hour && hour <= to
    }
}

/// One participant's view of a candidate slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantSlot {
    pub name: String,
    pub time: WallClock,
    pub timezone: String,
    pub suitable: bool,
}

/// A candidate slot that works for every participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingSuggestion {
    pub base_time: WallClock,
    pub base_timezone: String,
    pub participants: Vec<ParticipantSlot>,
}

/// Where the candidate slots come from.
///
/// Built through [`MeetingSearch::new`], so the candidate range always lies
/// within `0..=23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSearch {
    base_timezone: String,
    /// Whole hours in the base timezone.
    candidate_hours: RangeInclusive<u32>,
}

impl MeetingSearch {
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidArgument`] if the candidate range is
    /// empty or reaches past hour 23.
    pub fn new(
        base_timezone: impl Into<String>,
        candidate_hours: RangeInclusive<u32>,
    ) -> Result<Self, CalendarError> {
        if candidate_hours.is_empty() || *candidate_hours.end() > 23 {
            return Err(CalendarError::InvalidArgument(format!(
                "candidate hours must be a non-empty range within 0..=23, got {candidate_hours:?}"
            )));
        }
        Ok(Self {
            base_timezone: base_timezone.into(),
            candidate_hours,
        })
    }

    pub fn base_timezone(&self) -> &str {
        &self.base_timezone
    }

    pub fn candidate_hours(&self) -> RangeInclusive<u32> {
        self.candidate_hours.clone()
    }
}

impl Default for MeetingSearch {
    /// 08:00 to 18:00 GMT.
    fn default() -> Self {
        Self {
            base_timezone: "GMT".to_string(),
            candidate_hours: 8..=18,
        }
    }
}

/// Find every candidate slot in `search` that suits all `participants`.
///
/// A participant is suitable for a slot when the converted local hour lies
/// within their `available_hours` and the conversion does not cross into
/// another calendar day. Suggestions come back in candidate order. With no
/// participants every candidate qualifies.
///
/// # Examples
///
/// ```
/// use ba_calendar::{find_meeting_time, MeetingSearch, Participant, TimezoneTable};
///
/// let people = [
///     Participant::new("Ada", "GMT", 9, 17),
///     Participant::new("Grace", "EST", 9, 17),
/// ];
/// let slots = find_meeting_time(&TimezoneTable::default(), &people, &MeetingSearch::default());
/// assert_eq!(slots[0].base_time.to_string(), "14:00");
/// ```
pub fn find_meeting_time(
    table: &TimezoneTable,
    participants: &[Participant],
    search: &MeetingSearch,
) -> Vec<MeetingSuggestion> {
    search
        .candidate_hours()
        .filter_map(|hour| WallClock::new(hour, 0))
        .filter_map(|base_time| evaluate_slot(table, participants, search, base_time))
        .collect()
}

fn evaluate_slot(
    table: &TimezoneTable,
    participants: &[Participant],
    search: &MeetingSearch,
    base_time: WallClock,
) -> Option<MeetingSuggestion> {
    let slots: Vec<ParticipantSlot> = participants
        .iter()
        .map(|p| {
            let converted = table.convert(base_time, &search.base_timezone, &p.timezone);
            ParticipantSlot {
                name: p.name.clone(),
                time: converted.time,
                timezone: p.timezone.clone(),
                suitable: converted.day_offset == 0 && p.is_available_at(converted.time.hour()),
            }
        })
        .collect();

    slots.iter().all(|s| s.suitable).then(|| MeetingSuggestion {
        base_time,
        base_timezone: search.base_timezone.clone(),
        participants: slots,
    })
}
