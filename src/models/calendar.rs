//! Calendar, calendar entry, and time window models.
//!
//! A calendar is the set of entries a participant has already committed
//! to. Each entry occupies the half-open interval
//! `[start, start + duration)` on its date.
//!
//! # Encoding Helpers
//! The optimizer searches over real numbers, so dates and clock times
//! have a numeric form:
//! - date ↔ day ordinal (`NaiveDate::num_days_from_ce`)
//! - clock time ↔ fractional hours since midnight

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// A time-of-day interval [start, end) in fractional hours.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    /// Interval start (hours, inclusive).
    pub start: f64,
    /// Interval end (hours, exclusive).
    pub end: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Creates a window from a start time and a duration in minutes.
    pub fn from_start(start: f64, duration_minutes: u32) -> Self {
        Self::new(start, start + f64::from(duration_minutes) / 60.0)
    }

    /// Length of this window (hours).
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether an instant falls within this window.
    #[inline]
    pub fn contains(&self, hour: f64) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Whether two windows overlap. Touching endpoints do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A committed calendar entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarEntry {
    /// Entry title (the name of the event it came from).
    pub name: String,
    /// Calendar day.
    pub date: NaiveDate,
    /// Clock start time.
    pub start: NaiveTime,
    /// Length in minutes.
    pub duration_minutes: u32,
}

impl CalendarEntry {
    /// Creates a new entry.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            start,
            duration_minutes,
        }
    }

    /// Start time in fractional hours.
    #[inline]
    pub fn start_hours(&self) -> f64 {
        time_to_hours(self.start)
    }

    /// End time in fractional hours (may exceed 24 for entries crossing midnight).
    #[inline]
    pub fn end_hours(&self) -> f64 {
        self.start_hours() + self.duration_hours()
    }

    /// Duration in fractional hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes) / 60.0
    }

    /// The occupied interval on `self.date`.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_hours(), self.end_hours())
    }
}

/// A participant's calendar of committed entries.
///
/// Structurally a plain list: uniqueness of slots is enforced by the
/// conflict checker before anything is appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Calendar {
    /// Committed entries in insertion order.
    pub entries: Vec<CalendarEntry>,
}

impl Calendar {
    /// Creates an empty calendar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry (seeding existing bookings).
    pub fn with_entry(mut self, entry: CalendarEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Appends an entry without any conflict check.
    pub(crate) fn append(&mut self, entry: CalendarEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the calendar has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries.
    pub fn iter(&self) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.iter()
    }

    /// Entries on a given day, in insertion order.
    pub fn entries_on(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    /// Cumulative booked hours on a given day.
    pub fn booked_hours_on(&self, date: NaiveDate) -> f64 {
        self.entries_on(date).map(|e| e.duration_hours()).sum()
    }

    /// Distinct days that carry at least one entry, ascending.
    pub fn booked_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.entries.iter().map(|e| e.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

/// Numeric day ordinal of a date.
#[inline]
pub fn date_ordinal(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Decodes a real-valued day ordinal (floor) into a date.
///
/// Returns `None` for non-finite values or values outside chrono's range.
pub fn date_from_ordinal(ordinal: f64) -> Option<NaiveDate> {
    if !ordinal.is_finite() {
        return None;
    }
    let day = ordinal.floor();
    if day < f64::from(i32::MIN) || day > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(day as i32)
}

/// Converts a clock time into fractional hours since midnight.
#[inline]
pub fn time_to_hours(time: NaiveTime) -> f64 {
    f64::from(time.num_seconds_from_midnight()) / 3600.0
}

/// Converts fractional hours into a clock time, rounded to the minute.
///
/// Returns `None` unless the rounded value lies in `[00:00, 24:00)`.
pub fn hours_to_time(hours: f64) -> Option<NaiveTime> {
    if !hours.is_finite() {
        return None;
    }
    let minutes = (hours * 60.0).round();
    if !(0.0..1440.0).contains(&minutes) {
        return None;
    }
    NaiveTime::from_num_seconds_from_midnight_opt(minutes as u32 * 60, 0)
}
