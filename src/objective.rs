//! Penalty objective for candidate schedules.
//!
//! Maps a position (two reals per pending event: day ordinal, start hour)
//! to a non-negative penalty. Lower is better; zero means every event is
//! inside its horizon and work window, conflict-free, and the batch sits
//! on a single day.
//!
//! # Terms
//!
//! | Term | Trigger | Default weight |
//! |------|---------|----------------|
//! | Validity | date outside horizon; interval outside work window | 1 000 each |
//! | Overlap | per intersecting calendar entry; per overlapping pending pair | 10 000 each |
//! | Day-fit | per participant whose day has no free gap for the event | 1 000 each |
//! | Spread | `|day(i+1) - day(i)|` over consecutive events | 1 per day |
//!
//! The tiers are far apart, so the search is effectively lexicographic:
//! no spread improvement can pay for a constraint violation.
//!
//! Evaluation is pure. The as-of date is fixed when the objective is
//! built, so every evaluation within a run sees the same horizons.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::conflict::{fits_within_day, overlap_count, same_day_windows};
use crate::horizon::{Horizon, SchedulingPolicy};
use crate::models::{date_from_ordinal, Directory, Event, TimeWindow};

/// Penalty weights per violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Date outside the horizon, or interval outside the work window.
    pub validity: f64,
    /// Overlapping bookings (committed or pending).
    pub overlap: f64,
    /// No free gap on the participant's day.
    pub day_fit: f64,
    /// Per day between consecutive events.
    pub spread: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            validity: 1_000.0,
            overlap: 10_000.0,
            day_fit: 1_000.0,
            spread: 1.0,
        }
    }
}

/// Penalty split by term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PenaltyBreakdown {
    /// Horizon and work-window violations.
    pub validity: f64,
    /// Overlaps against committed entries and between pending events.
    pub overlap: f64,
    /// Days without a free gap.
    pub day_fit: f64,
    /// Temporal spread of the batch.
    pub spread: f64,
}

impl PenaltyBreakdown {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.validity + self.overlap + self.day_fit + self.spread
    }

    /// Whether no hard term (validity, overlap, day-fit) fired.
    pub fn is_feasible(&self) -> bool {
        self.validity == 0.0 && self.overlap == 0.0 && self.day_fit == 0.0
    }
}

/// One decoded (date, start) pair.
#[derive(Debug, Clone, Copy)]
struct Slot {
    date: Option<NaiveDate>,
    window: TimeWindow,
}

/// The objective over a fixed batch of pending events.
#[derive(Debug, Clone)]
pub struct Objective<'a> {
    events: &'a [Event],
    directory: &'a Directory,
    policy: SchedulingPolicy,
    weights: PenaltyWeights,
    horizons: Vec<Horizon>,
}

impl<'a> Objective<'a> {
    /// Builds the objective, resolving each event's horizon against `as_of`.
    pub fn new(
        events: &'a [Event],
        directory: &'a Directory,
        policy: SchedulingPolicy,
        weights: PenaltyWeights,
        as_of: NaiveDate,
    ) -> Self {
        let horizons = events
            .iter()
            .map(|e| policy.horizon_for(e, directory, as_of))
            .collect();
        Self {
            events,
            directory,
            policy,
            weights,
            horizons,
        }
    }

    /// The pending events.
    pub fn events(&self) -> &'a [Event] {
        self.events
    }

    /// The participant directory.
    pub fn directory(&self) -> &'a Directory {
        self.directory
    }

    /// The horizon policy.
    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Resolved horizon per event.
    pub fn horizons(&self) -> &[Horizon] {
        &self.horizons
    }

    /// Required position length.
    pub fn dimensions(&self) -> usize {
        self.events.len() * 2
    }

    /// Total penalty of `position`.
    pub fn evaluate(&self, position: &[f64]) -> f64 {
        self.breakdown(position).total()
    }

    /// Penalty of `position`, split by term.
    pub fn breakdown(&self, position: &[f64]) -> PenaltyBreakdown {
        let w = &self.weights;
        let slots = self.decode(position);
        let mut out = PenaltyBreakdown::default();

        for (i, (event, slot)) in self.events.iter().zip(&slots).enumerate() {
            let in_horizon = slot.date.is_some_and(|d| self.horizons[i].contains(d));
            if !in_horizon {
                out.validity += w.validity;
            }
            if !self.policy.within_work_window(&slot.window) {
                out.validity += w.validity;
            }

            let Some(date) = slot.date else {
                continue;
            };

            for id in &event.participants {
                let calendar = self.directory.calendar(id);
                let hits = overlap_count(date, slot.window.start, slot.window.end, calendar);
                out.overlap += w.overlap * hits as f64;

                if calendar.is_some()
                    && !fits_within_day(&slot.window, &same_day_windows(date, calendar))
                {
                    out.day_fit += w.day_fit;
                }
            }

            for (other, other_slot) in self.events.iter().zip(&slots).skip(i + 1) {
                if other_slot.date == Some(date)
                    && other_slot.window.overlaps(&slot.window)
                    && event.shares_participant(other)
                {
                    out.overlap += w.overlap;
                }
            }
        }

        out.spread = w.spread * spread_days(position);
        out
    }

    fn decode(&self, position: &[f64]) -> Vec<Slot> {
        position
            .chunks_exact(2)
            .zip(self.events)
            .map(|(pair, event)| Slot {
                date: date_from_ordinal(pair[0]),
                window: event.window_at(pair[1]),
            })
            .collect()
    }
}

/// Sum of absolute day differences between consecutive events.
fn spread_days(position: &[f64]) -> f64 {
    let days: Vec<f64> = position
        .chunks_exact(2)
        .map(|pair| pair[0].floor())
        .collect();
    days.windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .filter(|d| d.is_finite())
        .sum()
}
