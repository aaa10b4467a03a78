//! Writes an optimized schedule into participants' calendars.
//!
//! The committer is best-effort and non-transactional. For every event,
//! and every participant of that event in order, the slot is re-checked
//! against the participant's calendar as it stands at that moment
//! (including entries appended earlier in the same pass). Conflicting
//! participants are skipped; nothing is forced and nothing is rolled back.

use chrono::{NaiveDate, NaiveTime};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::conflict::overlaps;
use crate::error::SchedulingError;
use crate::models::{
    date_from_ordinal, hours_to_time, time_to_hours, CalendarEntry, Directory, Event,
};

/// Why a participant did not receive an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The slot overlaps an entry already in the calendar.
    Conflict,
    /// The participant ID is not in the directory.
    UnknownParticipant,
    /// The participant's calendar is not tracked.
    UntrackedCalendar,
}

/// An entry appended to a participant's calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommittedEntry {
    /// Source event.
    pub event_id: String,
    /// Receiving participant.
    pub participant_id: String,
    /// The appended entry.
    pub entry: CalendarEntry,
}

/// A participant left out of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedParticipant {
    /// Source event.
    pub event_id: String,
    /// Participant left out.
    pub participant_id: String,
    /// Why.
    pub reason: SkipReason,
}

/// What a commit pass did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitReport {
    /// Appended entries, in commit order.
    pub committed: Vec<CommittedEntry>,
    /// Participants that were skipped.
    pub skipped: Vec<SkippedParticipant>,
    /// Events whose slot could not be decoded into a date and clock time.
    pub unplaced: Vec<String>,
}

impl CommitReport {
    /// Number of appended entries.
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    /// Number of skipped participants.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Entries committed for one event.
    pub fn entries_for_event<'r>(
        &'r self,
        event_id: &'r str,
    ) -> impl Iterator<Item = &'r CommittedEntry> {
        self.committed.iter().filter(move |c| c.event_id == event_id)
    }
}

/// Decodes the slot of event `index` from a position.
///
/// Returns `None` if the slot is missing or does not map to a real date
/// and a clock time within the day.
pub fn decode_slot(position: &[f64], index: usize) -> Option<(NaiveDate, NaiveTime)> {
    let date = date_from_ordinal(*position.get(2 * index)?)?;
    let time = hours_to_time(*position.get(2 * index + 1)?)?;
    Some((date, time))
}

/// Commits optimized slots.
pub struct ScheduleCommitter;

impl ScheduleCommitter {
    /// Appends one entry per (event, participant) unless it would conflict.
    ///
    /// # Errors
    /// `DimensionMismatch` if `position` does not hold two slots per event.
    pub fn commit(
        events: &[Event],
        position: &[f64],
        directory: &mut Directory,
    ) -> Result<CommitReport, SchedulingError> {
        if position.len() != events.len() * 2 {
            return Err(SchedulingError::DimensionMismatch {
                expected: events.len() * 2,
                actual: position.len(),
            });
        }

        let mut report = CommitReport::default();

        for (index, event) in events.iter().enumerate() {
            let Some((date, start)) = decode_slot(position, index) else {
                warn!(
                    "Event '{}' has an undecodable slot {:?}; not committed",
                    event.id,
                    &position[2 * index..2 * index + 2]
                );
                report.unplaced.push(event.id.clone());
                continue;
            };

            let start_hours = time_to_hours(start);
            let end_hours = start_hours + event.duration_hours();

            for participant_id in &event.participants {
                let skip = |reason| SkippedParticipant {
                    event_id: event.id.clone(),
                    participant_id: participant_id.clone(),
                    reason,
                };

                let Some(participant) = directory.get_mut(participant_id) else {
                    report.skipped.push(skip(SkipReason::UnknownParticipant));
                    continue;
                };
                let Some(calendar) = participant.calendar.as_mut() else {
                    report.skipped.push(skip(SkipReason::UntrackedCalendar));
                    continue;
                };
                if overlaps(date, start_hours, end_hours, Some(&*calendar)) {
                    report.skipped.push(skip(SkipReason::Conflict));
                    continue;
                }

                let entry = event.entry_at(date, start);
                calendar.append(entry.clone());
                report.committed.push(CommittedEntry {
                    event_id: event.id.clone(),
                    participant_id: participant_id.clone(),
                    entry,
                });
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{date_ordinal, Calendar, Participant};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn directory() -> Directory {
        let busy = Calendar::new().with_entry(CalendarEntry::new("busy", day(), t(10, 0), 60));
        Directory::new()
            .with_participant(Participant::new("alice"))
            .with_participant(Participant::new("bob").with_calendar(busy))
            .with_participant(Participant::untracked("carol"))
    }

    fn event(id: &str) -> Event {
        Event::new(id, day(), t(8, 0)).with_name(format!("Meeting {id}"))
    }

    #[test]
    fn test_commit_appends_entries() {
        let mut dir = directory();
        let events = vec![event("E1").with_participant("alice")];
        let position = vec![date_ordinal(day()), 14.5];

        let report = ScheduleCommitter::commit(&events, &position, &mut dir).unwrap();
        assert_eq!(report.committed_count(), 1);
        let cal = dir.calendar("alice").unwrap();
        assert_eq!(cal.len(), 1);
        assert_eq!(cal.entries[0].name, "Meeting E1");
        assert_eq!(cal.entries[0].start, t(14, 30));
        assert_eq!(cal.entries[0].date, day());
    }

    #[test]
    fn test_conflicting_participant_unchanged() {
        let mut dir = directory();
        let before = dir.calendar("bob").cloned();
        let events = vec![event("E1").with_participant("alice").with_participant("bob")];
        let position = vec![date_ordinal(day()), 10.5];

        let report = ScheduleCommitter::commit(&events, &position, &mut dir).unwrap();
        assert_eq!(dir.calendar("bob").cloned(), before);
        assert_eq!(dir.calendar("alice").map(Calendar::len), Some(1));
        assert_eq!(
            report.skipped,
            vec![SkippedParticipant {
                event_id: "E1".into(),
                participant_id: "bob".into(),
                reason: SkipReason::Conflict,
            }]
        );
    }

    #[test]
    fn test_touching_slot_is_committed() {
        let mut dir = directory();
        let events = vec![event("E1").with_participant("bob")];
        let position = vec![date_ordinal(day()), 11.0]; // bob busy until 11:00

        let report = ScheduleCommitter::commit(&events, &position, &mut dir).unwrap();
        assert_eq!(report.committed_count(), 1);
        assert_eq!(dir.calendar("bob").map(Calendar::len), Some(2));
    }

    #[test]
    fn test_pending_events_conflict_during_commit() {
        let mut dir = directory();
        let events = vec![
            event("E1").with_participant("alice"),
            event("E2").with_participant("alice"),
        ];
        // Same slot for both: the second one loses
        let position = vec![date_ordinal(day()), 9.0, date_ordinal(day()), 9.5];

        let report = ScheduleCommitter::commit(&events, &position, &mut dir).unwrap();
        assert_eq!(report.entries_for_event("E1").count(), 1);
        assert_eq!(report.entries_for_event("E2").count(), 0);
        assert_eq!(report.skipped[0].event_id, "E2");
        assert_eq!(dir.calendar("alice").map(Calendar::len), Some(1));
    }

    #[test]
    fn test_unknown_and_untracked_participants_skipped() {
        let mut dir = directory();
        let events = vec![event("E1").with_participant("carol").with_participant("zed")];
        let position = vec![date_ordinal(day()), 9.0];

        let report = ScheduleCommitter::commit(&events, &position, &mut dir).unwrap();
        assert_eq!(report.committed_count(), 0);
        let reasons: Vec<_> = report.skipped.iter().map(|s| s.reason).collect();
        assert_eq!(
            reasons,
            vec![SkipReason::UntrackedCalendar, SkipReason::UnknownParticipant]
        );
        assert!(dir.calendar("carol").is_none());
    }

    #[test]
    fn test_no_participants_no_writes() {
        let mut dir = directory();
        let snapshot = dir.clone();
        let events = vec![event("E1")];
        let report =
            ScheduleCommitter::commit(&events, &[date_ordinal(day()), 9.0], &mut dir).unwrap();
        assert_eq!(report, CommitReport::default());
        for p in snapshot.iter() {
            assert_eq!(dir.get(&p.id), Some(p));
        }
    }

    #[test]
    fn test_undecodable_slot() {
        let mut dir = directory();
        let events = vec![event("E1").with_participant("alice")];
        let report =
            ScheduleCommitter::commit(&events, &[date_ordinal(day()), 25.0], &mut dir).unwrap();
        assert_eq!(report.unplaced, vec!["E1".to_string()]);
        assert_eq!(dir.calendar("alice").map(Calendar::len), Some(0));
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut dir = directory();
        let events = vec![event("E1")];
        let err = ScheduleCommitter::commit(&events, &[1.0], &mut dir).unwrap_err();
        assert!(matches!(
            err,
            SchedulingError::DimensionMismatch { expected: 2, actual: 1 }
        ));
    }

    #[test]
    fn test_decode_slot() {
        let p = vec![date_ordinal(day()) + 0.7, 9.26];
        assert_eq!(decode_slot(&p, 0), Some((day(), t(9, 16))));
        assert_eq!(decode_slot(&p, 1), None);
    }
}
