//! Scheduling horizon and daily time-window policy.
//!
//! Decides, per event, which dates and clock times are acceptable, and
//! draws initial candidate slots for the swarm.
//!
//! # Horizon
//! - Priority events: `priority_horizon_days` after the as-of date,
//!   extended to `extended_priority_horizon_days` when every participant
//!   already has a "full day" (cumulative bookings inside the full-day
//!   band) within the extended range. Busy-but-not-overloaded days are
//!   where priority meetings are routed.
//! - Regular events: `regular_horizon_days` after the as-of date.
//!
//! # Initial Slots
//! Start times are drawn uniformly from
//! `[max(nominal end, work start), work end]`, rounded to the configured
//! granularity, and redrawn while they collide with a participant's
//! calendar or with an event placed earlier in the same position. The
//! number of redraws is capped; when the cap is hit, the least-colliding
//! draw is kept.

use chrono::{Days, NaiveDate};
use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::conflict::overlap_count;
use crate::models::{Directory, Event, TimeWindow};

/// Horizon and time-window rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulingPolicy {
    /// Permitted daily window; an event must start and end inside it.
    pub work_window: TimeWindow,
    /// Rounding step for sampled start times (hours).
    pub granularity_hours: f64,
    /// Horizon for priority events (days after as-of).
    pub priority_horizon_days: u32,
    /// Horizon for priority events whose participants all have a full day.
    pub extended_priority_horizon_days: u32,
    /// Horizon for regular events (days after as-of).
    pub regular_horizon_days: u32,
    /// Lower bound of the full-day band (hours booked).
    pub full_day_min_hours: f64,
    /// Upper bound of the full-day band (hours booked).
    pub full_day_max_hours: f64,
    /// Redraw cap for the initial slot sampler.
    pub max_sampling_attempts: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            work_window: TimeWindow::new(7.0, 18.0),
            granularity_hours: 0.25,
            priority_horizon_days: 2,
            extended_priority_horizon_days: 4,
            regular_horizon_days: 21,
            full_day_min_hours: 8.0,
            full_day_max_hours: 12.0,
            max_sampling_attempts: 64,
        }
    }
}

/// Inclusive range of dates an event may be placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    /// First allowed date.
    pub earliest: NaiveDate,
    /// Last allowed date.
    pub latest: NaiveDate,
}

impl Horizon {
    /// Whether `date` is inside the horizon.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.earliest && date <= self.latest
    }

    /// Number of days after `earliest` that are still allowed.
    pub fn span_days(&self) -> i64 {
        (self.latest - self.earliest).num_days()
    }
}

/// A pending event already placed in a partially built position.
#[derive(Debug, Clone, Copy)]
pub struct PlacedSlot<'a> {
    /// The event.
    pub event: &'a Event,
    /// Its sampled date.
    pub date: NaiveDate,
    /// Its sampled interval.
    pub window: TimeWindow,
}

impl SchedulingPolicy {
    /// Sets the daily work window (hours).
    pub fn with_work_window(mut self, start: f64, end: f64) -> Self {
        self.work_window = TimeWindow::new(start, end);
        self
    }

    /// Sets the start-time granularity (hours).
    pub fn with_granularity(mut self, hours: f64) -> Self {
        self.granularity_hours = hours;
        self
    }

    /// Sets priority horizons (base and extended, in days).
    pub fn with_priority_horizon(mut self, days: u32, extended_days: u32) -> Self {
        self.priority_horizon_days = days;
        self.extended_priority_horizon_days = extended_days;
        self
    }

    /// Sets the regular horizon (days).
    pub fn with_regular_horizon(mut self, days: u32) -> Self {
        self.regular_horizon_days = days;
        self
    }

    /// Sets the redraw cap of the initial slot sampler.
    pub fn with_max_sampling_attempts(mut self, attempts: u32) -> Self {
        self.max_sampling_attempts = attempts;
        self
    }

    /// Computes the allowed date range for `event`.
    pub fn horizon_for(&self, event: &Event, directory: &Directory, as_of: NaiveDate) -> Horizon {
        let days = if !event.priority {
            self.regular_horizon_days
        } else if self.all_participants_have_full_day(event, directory, as_of) {
            self.extended_priority_horizon_days
        } else {
            self.priority_horizon_days
        };

        Horizon {
            earliest: as_of,
            latest: as_of
                .checked_add_days(Days::new(u64::from(days)))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    /// Whether every participant has a day inside the extended priority
    /// range whose bookings fall in the full-day band.
    fn all_participants_have_full_day(
        &self,
        event: &Event,
        directory: &Directory,
        as_of: NaiveDate,
    ) -> bool {
        if event.participants.is_empty() {
            return false;
        }
        let last = as_of
            .checked_add_days(Days::new(u64::from(self.extended_priority_horizon_days)))
            .unwrap_or(NaiveDate::MAX);

        event.participants.iter().all(|id| {
            directory.calendar(id).is_some_and(|calendar| {
                calendar
                    .booked_dates()
                    .into_iter()
                    .filter(|d| *d >= as_of && *d <= last)
                    .any(|d| {
                        let load = calendar.booked_hours_on(d);
                        load >= self.full_day_min_hours && load <= self.full_day_max_hours
                    })
            })
        })
    }

    /// Whether `window` lies inside the daily work window.
    pub fn within_work_window(&self, window: &TimeWindow) -> bool {
        self.work_window.encloses(window)
    }

    /// Rounds an hour value to the configured granularity.
    pub fn round_to_granularity(&self, hours: f64) -> f64 {
        if self.granularity_hours <= 0.0 {
            return hours;
        }
        (hours / self.granularity_hours).round() * self.granularity_hours
    }

    /// Draws a date uniformly from the horizon (inclusive).
    pub fn sample_date<R: Rng>(&self, horizon: &Horizon, rng: &mut R) -> NaiveDate {
        let span = horizon.span_days().max(0) as u64;
        let offset = rng.random_range(0..=span);
        horizon
            .earliest
            .checked_add_days(Days::new(offset))
            .unwrap_or(horizon.latest)
    }

    /// Draws a start time for `event` on `date` by bounded rejection sampling.
    ///
    /// A draw is rejected while it overlaps a booking of one of the event's
    /// participants or an earlier placed event sharing a participant.
    pub fn sample_start<R: Rng>(
        &self,
        event: &Event,
        date: NaiveDate,
        placed: &[PlacedSlot<'_>],
        directory: &Directory,
        rng: &mut R,
    ) -> f64 {
        let upper = self.work_window.end;
        let lower = event.end_hours().max(self.work_window.start).min(upper);

        let mut best = (usize::MAX, lower);
        for _ in 0..self.max_sampling_attempts.max(1) {
            let raw = lower + (upper - lower) * rng.random::<f64>();
            let start = self.round_to_granularity(raw);
            let collisions = self.collisions(event, date, start, placed, directory);
            if collisions == 0 {
                return start;
            }
            if collisions < best.0 {
                best = (collisions, start);
            }
        }

        warn!(
            "No collision-free start for event '{}' on {} after {} draws; keeping one with {} collision(s)",
            event.id,
            date,
            self.max_sampling_attempts.max(1),
            best.0
        );
        best.1
    }

    fn collisions(
        &self,
        event: &Event,
        date: NaiveDate,
        start: f64,
        placed: &[PlacedSlot<'_>],
        directory: &Directory,
    ) -> usize {
        let window = event.window_at(start);

        let committed: usize = event
            .participants
            .iter()
            .map(|id| overlap_count(date, window.start, window.end, directory.calendar(id)))
            .sum();

        let pending = placed
            .iter()
            .filter(|slot| {
                slot.date == date
                    && slot.window.overlaps(&window)
                    && slot.event.shares_participant(event)
            })
            .count();

        committed + pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Calendar, CalendarEntry, Participant};
    use chrono::NaiveTime;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn full_day_calendar(date: NaiveDate) -> Calendar {
        Calendar::new()
            .with_entry(CalendarEntry::new("AM", date, t(8), 240))
            .with_entry(CalendarEntry::new("PM", date, t(13), 300))
    }

    #[test]
    fn test_regular_horizon() {
        let policy = SchedulingPolicy::default();
        let e = Event::new("E", as_of(), t(9));
        let h = policy.horizon_for(&e, &Directory::new(), as_of());
        assert_eq!(h.earliest, as_of());
        assert_eq!(h.span_days(), 21);
    }

    #[test]
    fn test_priority_horizon_base() {
        let policy = SchedulingPolicy::default();
        let dir = Directory::new().with_participant(Participant::new("alice"));
        let e = Event::new("E", as_of(), t(9))
            .with_priority(true)
            .with_participant("alice");
        assert_eq!(policy.horizon_for(&e, &dir, as_of()).span_days(), 2);
    }

    #[test]
    fn test_priority_horizon_extended_when_all_full() {
        let policy = SchedulingPolicy::default();
        let busy_day = as_of().succ_opt().unwrap();
        let dir = Directory::new()
            .with_participant(Participant::new("alice").with_calendar(full_day_calendar(busy_day)))
            .with_participant(Participant::new("bob").with_calendar(full_day_calendar(as_of())));
        let e = Event::new("E", as_of(), t(9))
            .with_priority(true)
            .with_participant("alice")
            .with_participant("bob");
        assert_eq!(policy.horizon_for(&e, &dir, as_of()).span_days(), 4);

        // One participant without a full day keeps the short horizon
        let dir = dir.with_participant(Participant::new("carol"));
        let e = e.with_participant("carol");
        assert_eq!(policy.horizon_for(&e, &dir, as_of()).span_days(), 2);
    }

    #[test]
    fn test_full_day_outside_range_ignored() {
        let policy = SchedulingPolicy::default();
        let past = as_of().pred_opt().unwrap();
        let dir = Directory::new()
            .with_participant(Participant::new("alice").with_calendar(full_day_calendar(past)));
        let e = Event::new("E", as_of(), t(9))
            .with_priority(true)
            .with_participant("alice");
        assert_eq!(policy.horizon_for(&e, &dir, as_of()).span_days(), 2);
    }

    #[test]
    fn test_round_to_granularity() {
        let policy = SchedulingPolicy::default();
        assert!((policy.round_to_granularity(9.1) - 9.0).abs() < 1e-10);
        assert!((policy.round_to_granularity(9.13) - 9.25).abs() < 1e-10);
        let exact = policy.with_granularity(0.0);
        assert!((exact.round_to_granularity(9.13) - 9.13).abs() < 1e-10);
    }

    #[test]
    fn test_sample_date_within_horizon() {
        let policy = SchedulingPolicy::default();
        let h = Horizon {
            earliest: as_of(),
            latest: as_of().checked_add_days(Days::new(3)).unwrap(),
        };
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(h.contains(policy.sample_date(&h, &mut rng)));
        }
    }

    #[test]
    fn test_sample_start_avoids_bookings() {
        let policy = SchedulingPolicy::default();
        // Busy 07:00-12:00; nominal end at 08:00 leaves [8, 18] to draw from
        let cal = Calendar::new().with_entry(CalendarEntry::new("busy", as_of(), t(7), 300));
        let dir = Directory::new().with_participant(Participant::new("alice").with_calendar(cal));
        let e = Event::new("E", as_of(), t(7)).with_participant("alice");

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let start = policy.sample_start(&e, as_of(), &[], &dir, &mut rng);
            assert!(start >= 12.0 && start <= 18.0, "start {start}");
            // Quarter-hour grid
            assert!(((start * 4.0).round() - start * 4.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sample_start_avoids_placed_events() {
        let policy = SchedulingPolicy::default().with_work_window(9.0, 11.0);
        let dir = Directory::new().with_participant(Participant::new("alice"));
        let first = Event::new("A", as_of(), t(6)).with_participant("alice");
        let second = Event::new("B", as_of(), t(6)).with_participant("alice");
        let placed = [PlacedSlot {
            event: &first,
            date: as_of(),
            window: TimeWindow::new(9.0, 10.0),
        }];

        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            let start = policy.sample_start(&second, as_of(), &placed, &dir, &mut rng);
            assert!(start >= 10.0, "start {start}");
        }
    }

    #[test]
    fn test_sample_start_gives_up_gracefully() {
        // Whole day booked: no collision-free slot exists
        let policy = SchedulingPolicy::default().with_max_sampling_attempts(5);
        let cal = Calendar::new().with_entry(CalendarEntry::new("busy", as_of(), t(0), 1439));
        let dir = Directory::new().with_participant(Participant::new("alice").with_calendar(cal));
        let e = Event::new("E", as_of(), t(6)).with_participant("alice");

        let mut rng = SmallRng::seed_from_u64(1);
        let start = policy.sample_start(&e, as_of(), &[], &dir, &mut rng);
        assert!(start >= 7.0 && start <= 18.0);
    }
}
