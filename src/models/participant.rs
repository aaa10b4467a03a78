//! Participant model and the directory that owns participants.
//!
//! Events refer to participants by ID. The directory resolves those IDs
//! to in-memory calendar snapshots; an ID that is missing, or a
//! participant without a calendar, imposes no constraints.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Calendar;

/// A person who attends events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    /// Unique participant identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Existing bookings. `None` = calendar not tracked.
    pub calendar: Option<Calendar>,
}

impl Participant {
    /// Creates a participant with an empty calendar.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            calendar: Some(Calendar::new()),
        }
    }

    /// Creates a participant whose calendar is not tracked.
    pub fn untracked(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            calendar: None,
        }
    }

    /// Sets the participant name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the calendar.
    pub fn with_calendar(mut self, calendar: Calendar) -> Self {
        self.calendar = Some(calendar);
        self
    }
}

/// Participants keyed by ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Directory {
    participants: HashMap<String, Participant>,
}

impl Directory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a participant.
    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.insert(participant);
        self
    }

    /// Adds (or replaces) a participant.
    pub fn insert(&mut self, participant: Participant) {
        self.participants.insert(participant.id.clone(), participant);
    }

    /// Looks up a participant.
    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Participant> {
        self.participants.get_mut(id)
    }

    /// The calendar of a participant, if both exist.
    pub fn calendar(&self, id: &str) -> Option<&Calendar> {
        self.get(id).and_then(|p| p.calendar.as_ref())
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Iterates over all participants (arbitrary order).
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.values()
    }
}

impl FromIterator<Participant> for Directory {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let mut directory = Directory::new();
        for participant in iter {
            directory.insert(participant);
        }
        directory
    }
}
