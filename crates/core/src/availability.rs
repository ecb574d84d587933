//! Weekly availability template and calendar event materialization.
//!
//! A supplier describes availability as a fixed seven-entry template (one
//! [`DailySlot`] per weekday). [`generate_events`] expands that template into
//! concrete dated [`CalendarEvent`]s over a forward horizon. The expansion is
//! a pure function of its inputs; callers regenerate wholesale on save.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of forward days materialized from the weekly template.
pub const DEFAULT_HORIZON_DAYS: u32 = 50;

/// Title carried by every availability event.
pub const AVAILABLE_TITLE: &str = "Available";

/// Weekdays in template order (Monday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Default opening time for every template day.
pub const DEFAULT_START_TIME: SlotTime = SlotTime::from_hm(9, 0);

/// Default closing time for every template day.
pub const DEFAULT_END_TIME: SlotTime = SlotTime::from_hm(17, 0);

// ---------------------------------------------------------------------------
// Weekday names
// ---------------------------------------------------------------------------

/// English weekday name as exchanged with the backend (`"Monday"`, ...).
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse an English weekday name. Matching is exact.
pub fn parse_weekday_name(name: &str) -> Result<Weekday, CoreError> {
    WEEKDAYS
        .iter()
        .copied()
        .find(|d| weekday_name(*d) == name)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid weekday '{name}'. Must be a full English weekday name"
            ))
        })
}

/// Serde adapter storing a [`Weekday`] as its full English name.
pub mod day_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::parse_weekday_name(&name).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SlotTime
// ---------------------------------------------------------------------------

/// A wall-clock time of day with minute precision, written `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime(NaiveTime);

impl SlotTime {
    /// Build from hour and minute. Panics at compile time for constants out
    /// of range; use [`SlotTime::new`] for untrusted input.
    const fn from_hm(hour: u32, minute: u32) -> Self {
        match NaiveTime::from_hms_opt(hour, minute, 0) {
            Some(t) => Self(t),
            None => panic!("invalid slot time"),
        }
    }

    pub fn new(hour: u32, minute: u32) -> Result<Self, CoreError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                CoreError::Validation(format!("Invalid time {hour}:{minute}. Expected HH:MM"))
            })
    }

    /// Parse an `HH:MM` string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| CoreError::Validation(format!("Invalid time '{s}'. Expected HH:MM")))
    }

    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    /// Combine with a calendar date into a local timestamp.
    pub fn on(self, date: NaiveDate) -> Timestamp {
        date.and_time(self.0)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// DailySlot / WeeklySlots
// ---------------------------------------------------------------------------

/// Recurring availability for one weekday.
///
/// When `is_available` is false the times are ignored, but kept so that
/// re-enabling the day restores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySlot {
    #[serde(with = "day_name")]
    pub day: Weekday,
    pub is_available: bool,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
}

impl DailySlot {
    /// Whether the slot describes an empty or inverted interval.
    pub fn is_inverted(&self) -> bool {
        self.start_time >= self.end_time
    }
}

/// The seven-day availability template, always one slot per weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DailySlot>", into = "Vec<DailySlot>")]
pub struct WeeklySlots([DailySlot; 7]);

impl Default for WeeklySlots {
    /// Monday to Friday available 09:00-17:00, weekend unavailable.
    fn default() -> Self {
        Self(WEEKDAYS.map(|day| DailySlot {
            day,
            is_available: !matches!(day, Weekday::Sat | Weekday::Sun),
            start_time: DEFAULT_START_TIME,
            end_time: DEFAULT_END_TIME,
        }))
    }
}

impl WeeklySlots {
    /// Slot for `day`.
    pub fn get(&self, day: Weekday) -> &DailySlot {
        &self.0[day.num_days_from_monday() as usize]
    }

    fn get_mut(&mut self, day: Weekday) -> &mut DailySlot {
        &mut self.0[day.num_days_from_monday() as usize]
    }

    /// Iterate Monday to Sunday.
    pub fn iter(&self) -> impl Iterator<Item = &DailySlot> {
        self.0.iter()
    }

    pub fn set_available(&mut self, day: Weekday, is_available: bool) {
        self.get_mut(day).is_available = is_available;
    }

    pub fn set_start_time(&mut self, day: Weekday, time: SlotTime) {
        self.get_mut(day).start_time = time;
    }

    pub fn set_end_time(&mut self, day: Weekday, time: SlotTime) {
        self.get_mut(day).end_time = time;
    }

    /// Reject any available day whose start is not strictly before its end.
    ///
    /// Unavailable days are not checked since their times are ignored.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.iter().find(|s| s.is_available && s.is_inverted()) {
            Some(slot) => Err(CoreError::Validation(format!(
                "{}: start time {} must be before end time {}",
                weekday_name(slot.day),
                slot.start_time,
                slot.end_time
            ))),
            None => Ok(()),
        }
    }
}

impl TryFrom<Vec<DailySlot>> for WeeklySlots {
    type Error = CoreError;

    /// Accepts the seven slots in any order; each weekday exactly once.
    fn try_from(mut slots: Vec<DailySlot>) -> Result<Self, Self::Error> {
        slots.sort_by_key(|s| s.day.num_days_from_monday());
        if let Some(pair) = slots.windows(2).find(|w| w[0].day == w[1].day) {
            return Err(CoreError::Validation(format!(
                "Duplicate weekly slot for {}",
                weekday_name(pair[0].day)
            )));
        }

        let days: [DailySlot; 7] = slots.try_into().map_err(|rest: Vec<DailySlot>| {
            CoreError::Validation(format!(
                "Weekly slots must contain exactly 7 entries, got {}",
                rest.len()
            ))
        })?;
        Ok(Self(days))
    }
}

impl From<WeeklySlots> for Vec<DailySlot> {
    fn from(slots: WeeklySlots) -> Self {
        slots.0.into()
    }
}

// ---------------------------------------------------------------------------
// CalendarEvent
// ---------------------------------------------------------------------------

/// A concrete dated availability block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl CalendarEvent {
    /// A hand-placed availability block with a globally unique id.
    pub fn manual(start: Timestamp, end: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: AVAILABLE_TITLE.to_string(),
            start,
            end,
        }
    }
}

/// Materialize the weekly template into dated events.
///
/// Walks `horizon_days` consecutive dates starting at `today` (inclusive)
/// and emits one event per date whose weekday is available. Event ids are
/// unique within the returned batch only. Start and end times are copied
/// as-is, so an inverted slot yields an inverted interval.
pub fn generate_events(
    weekly_slots: &WeeklySlots,
    horizon_days: u32,
    today: NaiveDate,
) -> Vec<CalendarEvent> {
    let batch = today.format("%Y%m%d");

    today
        .iter_days()
        .take(horizon_days as usize)
        .enumerate()
        .filter_map(|(i, date)| {
            let slot = weekly_slots.get(date.weekday());
            slot.is_available.then(|| CalendarEvent {
                id: format!("avail-{batch}-{i}"),
                title: AVAILABLE_TITLE.to_string(),
                start: slot.start_time.on(date),
                end: slot.end_time.on(date),
            })
        })
        .collect()
}

/// [`generate_events`] anchored at the current local date.
pub fn generate_events_from_today(
    weekly_slots: &WeeklySlots,
    horizon_days: u32,
) -> Vec<CalendarEvent> {
    generate_events(
        weekly_slots,
        horizon_days,
        chrono::Local::now().date_naive(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
