//! Event model.
//!
//! An event is a meeting waiting for a slot. Its nominal date and start
//! time are the requester's wishes; the optimizer proposes the real slot
//! separately and never changes the duration or the participant list.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::calendar::{time_to_hours, CalendarEntry, TimeWindow};

/// An event to be scheduled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Unique event identifier.
    pub id: String,
    /// Human-readable name (copied onto committed calendar entries).
    pub name: String,
    /// Nominal date.
    pub date: NaiveDate,
    /// Nominal start time.
    pub start: NaiveTime,
    /// Length in minutes.
    pub duration_minutes: u32,
    /// Priority events get a short scheduling horizon.
    pub priority: bool,
    /// Participant IDs. Order only matters for tie-breaking.
    pub participants: Vec<String>,
}

impl Event {
    /// Creates a one-hour, non-priority event with no participants.
    pub fn new(id: impl Into<String>, date: NaiveDate, start: NaiveTime) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            date,
            start,
            duration_minutes: 60,
            priority: false,
            participants: Vec::new(),
        }
    }

    /// Sets the event name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the duration in minutes.
    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Marks the event as priority (or not).
    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a participant reference.
    pub fn with_participant(mut self, participant_id: impl Into<String>) -> Self {
        self.participants.push(participant_id.into());
        self
    }

    /// Duration in fractional hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes) / 60.0
    }

    /// Nominal start in fractional hours.
    #[inline]
    pub fn start_hours(&self) -> f64 {
        time_to_hours(self.start)
    }

    /// Nominal end in fractional hours.
    #[inline]
    pub fn end_hours(&self) -> f64 {
        self.start_hours() + self.duration_hours()
    }

    /// The interval this event would occupy if it started at `start`.
    pub fn window_at(&self, start: f64) -> TimeWindow {
        TimeWindow::from_start(start, self.duration_minutes)
    }

    /// Whether this event shares at least one participant with `other`.
    pub fn shares_participant(&self, other: &Event) -> bool {
        self.participants
            .iter()
            .any(|p| other.participants.contains(p))
    }

    /// Builds the calendar entry committed for a concrete slot.
    pub fn entry_at(&self, date: NaiveDate, start: NaiveTime) -> CalendarEntry {
        CalendarEntry::new(self.name.clone(), date, start, self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_event_builder() {
        let e = Event::new("E1", d(6), t(10, 0))
            .with_name("Design review")
            .with_duration_minutes(90)
            .with_priority(true)
            .with_participant("alice")
            .with_participant("bob");

        assert_eq!(e.id, "E1");
        assert_eq!(e.name, "Design review");
        assert_eq!(e.duration_minutes, 90);
        assert!(e.priority);
        assert_eq!(e.participants, vec!["alice".to_string(), "bob".to_string()]);
        assert!((e.end_hours() - 11.5).abs() < 1e-10);
    }

    #[test]
    fn test_event_defaults() {
        let e = Event::new("E1", d(6), t(8, 0));
        assert_eq!(e.duration_minutes, 60);
        assert!(!e.priority);
        assert!(e.participants.is_empty());
    }

    #[test]
    fn test_window_at() {
        let e = Event::new("E1", d(6), t(8, 0)).with_duration_minutes(30);
        assert_eq!(e.window_at(14.0), TimeWindow::new(14.0, 14.5));
    }

    #[test]
    fn test_shares_participant() {
        let a = Event::new("A", d(6), t(8, 0)).with_participant("alice");
        let b = Event::new("B", d(6), t(8, 0))
            .with_participant("bob")
            .with_participant("alice");
        let c = Event::new("C", d(6), t(8, 0)).with_participant("carol");

        assert!(a.shares_participant(&b));
        assert!(!a.shares_participant(&c));
    }

    #[test]
    fn test_entry_at() {
        let e = Event::new("E1", d(6), t(8, 0))
            .with_name("Sync")
            .with_duration_minutes(45);
        let entry = e.entry_at(d(9), t(15, 15));
        assert_eq!(entry.name, "Sync");
        assert_eq!(entry.date, d(9));
        assert_eq!(entry.duration_minutes, 45);
    }
}
