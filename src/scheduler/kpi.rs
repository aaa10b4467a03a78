//! Schedule quality metrics (KPIs).
//!
//! Summarizes an optimized and committed batch.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion Rate | Fraction of events every participant received |
//! | Committed Entries | Calendar entries written |
//! | Skipped Participants | (event, participant) pairs left out |
//! | Date Span | Days between the earliest and latest chosen date |
//! | Total Penalty | Objective value of the chosen schedule |

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::commit::{decode_slot, CommitReport};
use crate::models::Event;
use crate::objective::PenaltyBreakdown;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Fraction of events committed for all their participants (0.0..1.0).
    pub completion_rate: f64,
    /// Calendar entries written.
    pub committed_entries: usize,
    /// Participants skipped across all events.
    pub skipped_participants: usize,
    /// Events whose slot could not be decoded.
    pub unplaced_events: usize,
    /// Entries written per participant.
    pub entries_by_participant: HashMap<String, usize>,
    /// Earliest chosen date.
    pub first_date: Option<NaiveDate>,
    /// Latest chosen date.
    pub last_date: Option<NaiveDate>,
    /// Days between `first_date` and `last_date`.
    pub date_span_days: i64,
    /// Total penalty of the chosen schedule.
    pub total_penalty: f64,
    /// Whether no hard penalty term fired.
    pub feasible: bool,
}

impl ScheduleKpi {
    /// Computes KPIs for a committed batch.
    ///
    /// # Arguments
    /// * `events` - The pending events, in position order.
    /// * `position` - The chosen schedule.
    /// * `report` - What the committer did with it.
    /// * `penalty` - The objective breakdown of `position`.
    pub fn calculate(
        events: &[Event],
        position: &[f64],
        report: &CommitReport,
        penalty: &PenaltyBreakdown,
    ) -> Self {
        let mut complete = 0usize;
        for event in events {
            let committed = report.entries_for_event(&event.id).count();
            // An event without participants has nothing to miss
            if committed == event.participants.len() {
                complete += 1;
            }
        }

        let mut entries_by_participant = HashMap::new();
        for entry in &report.committed {
            *entries_by_participant
                .entry(entry.participant_id.clone())
                .or_insert(0) += 1;
        }

        let dates: Vec<NaiveDate> = (0..events.len())
            .filter_map(|i| decode_slot(position, i).map(|(date, _)| date))
            .collect();
        let first_date = dates.iter().min().copied();
        let last_date = dates.iter().max().copied();
        let date_span_days = match (first_date, last_date) {
            (Some(first), Some(last)) => (last - first).num_days(),
            _ => 0,
        };

        let completion_rate = if events.is_empty() {
            1.0
        } else {
            complete as f64 / events.len() as f64
        };

        Self {
            completion_rate,
            committed_entries: report.committed_count(),
            skipped_participants: report.skipped_count(),
            unplaced_events: report.unplaced.len(),
            entries_by_participant,
            first_date,
            last_date,
            date_span_days,
            total_penalty: penalty.total(),
            feasible: penalty.is_feasible(),
        }
    }

    /// Whether the batch meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_skipped: usize, min_completion_rate: f64) -> bool {
        self.skipped_participants <= max_skipped && self.completion_rate >= min_completion_rate
    }
}
