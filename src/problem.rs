//! Event scheduling as a swarm problem.
//!
//! Bridges the calendar domain (events, participants, horizons) to the
//! generic PSO runner.
//!
//! # Encoding
//! Two slots per pending event, in event order:
//! `[day ordinal, start hour, day ordinal, start hour, ...]`.

use rand::Rng;

use crate::horizon::PlacedSlot;
use crate::models::date_ordinal;
use crate::objective::Objective;
use crate::pso::PsoProblem;

/// PSO problem over a batch of pending events.
#[derive(Debug, Clone)]
pub struct EventSchedulingProblem<'a> {
    objective: Objective<'a>,
}

impl<'a> EventSchedulingProblem<'a> {
    /// Wraps an objective.
    pub fn new(objective: Objective<'a>) -> Self {
        Self { objective }
    }

    /// The underlying objective.
    pub fn objective(&self) -> &Objective<'a> {
        &self.objective
    }
}

impl PsoProblem for EventSchedulingProblem<'_> {
    fn dimensions(&self) -> usize {
        self.objective.dimensions()
    }

    /// Places events one after another: a date drawn from the event's
    /// horizon, then a start time that avoids its participants' bookings
    /// and the events placed before it.
    fn initialize<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        let policy = self.objective.policy();
        let directory = self.objective.directory();
        let events = self.objective.events();

        let mut placed: Vec<PlacedSlot<'_>> = Vec::with_capacity(events.len());
        let mut position = Vec::with_capacity(self.dimensions());

        for (event, horizon) in events.iter().zip(self.objective.horizons()) {
            let date = policy.sample_date(horizon, rng);
            let start = policy.sample_start(event, date, &placed, directory, rng);
            placed.push(PlacedSlot {
                event,
                date,
                window: event.window_at(start),
            });
            position.push(date_ordinal(date));
            position.push(start);
        }

        position
    }

    fn evaluate(&self, position: &[f64]) -> f64 {
        self.objective.evaluate(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::horizon::SchedulingPolicy;
    use crate::models::{date_from_ordinal, Calendar, CalendarEntry, Directory, Event, Participant};
    use crate::objective::PenaltyWeights;
    use chrono::{NaiveDate, NaiveTime};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_initialize_shape_and_horizon() {
        let dir = Directory::new().with_participant(Participant::new("alice"));
        let events = vec![
            Event::new("E1", as_of(), t(8)).with_participant("alice"),
            Event::new("E2", as_of(), t(8))
                .with_priority(true)
                .with_participant("alice"),
        ];
        let objective = Objective::new(
            &events,
            &dir,
            SchedulingPolicy::default(),
            PenaltyWeights::default(),
            as_of(),
        );
        let problem = EventSchedulingProblem::new(objective);
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..20 {
            let position = problem.initialize(&mut rng);
            assert_eq!(position.len(), problem.dimensions());
            for (i, pair) in position.chunks_exact(2).enumerate() {
                let date = date_from_ordinal(pair[0]).unwrap();
                assert!(problem.objective().horizons()[i].contains(date));
                assert!(pair[1] >= 9.0 && pair[1] <= 18.0);
            }
        }
    }

    #[test]
    fn test_initialize_avoids_conflicts_when_possible() {
        // Only one day allowed, bookings leave 12:00-18:00 free
        let cal = Calendar::new().with_entry(CalendarEntry::new("busy", as_of(), t(7), 300));
        let dir = Directory::new().with_participant(Participant::new("alice").with_calendar(cal));
        let events = vec![
            Event::new("E1", as_of(), t(6)).with_participant("alice"),
            Event::new("E2", as_of(), t(6)).with_participant("alice"),
        ];
        let policy = SchedulingPolicy::default().with_regular_horizon(0);
        let objective = Objective::new(&events, &dir, policy, PenaltyWeights::default(), as_of());
        let problem = EventSchedulingProblem::new(objective);
        let mut rng = SmallRng::seed_from_u64(2);

        for _ in 0..20 {
            let position = problem.initialize(&mut rng);
            let b = problem.objective().breakdown(&position);
            assert_eq!(b.overlap, 0.0, "position {position:?}");
        }
    }
}
