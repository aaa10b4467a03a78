//! Calendar domain models.
//!
//! Plain data records for the scheduling problem: the events waiting for a
//! slot, the participants who attend them, and the calendars of entries
//! those participants have already committed to.
//!
//! # Time Model
//! Dates are calendar days (`chrono::NaiveDate`). Within a day, times are
//! handled as fractional hours since midnight (`9.5` = 09:30). Durations
//! are whole minutes and can never be negative.
//!
//! # Ownership
//!
//! | Record | Owned by | Mutated by |
//! |--------|----------|------------|
//! | `Event` | caller | nobody (the optimizer proposes slots separately) |
//! | `Participant` | `Directory` | nobody |
//! | `Calendar` | `Participant` | the schedule committer only |

mod calendar;
mod event;
mod participant;

pub use calendar::{
    date_from_ordinal, date_ordinal, hours_to_time, time_to_hours, Calendar, CalendarEntry,
    TimeWindow,
};
pub use event::Event;
pub use participant::{Directory, Participant};
