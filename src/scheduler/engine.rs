//! End-to-end scheduling run.
//!
//! # Pipeline
//!
//! 1. Validate configuration and events (all issues reported at once).
//! 2. Fix the reference date once for the whole run.
//! 3. Resolve horizons and build the objective.
//! 4. Run the swarm.
//! 5. Commit the best position into participants' calendars.
//! 6. Compute KPIs.

use log::info;

use super::ScheduleKpi;
use crate::commit::{CommitReport, ScheduleCommitter};
use crate::config::SchedulerConfig;
use crate::error::SchedulingError;
use crate::models::{Directory, Event};
use crate::objective::{Objective, PenaltyBreakdown};
use crate::problem::EventSchedulingProblem;
use crate::pso::{PsoResult, PsoRunner};
use crate::validation::{validate_config, validate_events};

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    /// Optimizer output.
    pub result: PsoResult,
    /// Penalty of the chosen position, split by term.
    pub breakdown: PenaltyBreakdown,
    /// What the committer wrote and skipped.
    pub report: CommitReport,
    /// Summary metrics.
    pub kpi: ScheduleKpi,
}

/// Optimizes a batch of pending events and commits the result.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_calendar::config::SchedulerConfig;
/// use u_calendar::models::{Directory, Event, Participant};
/// use u_calendar::pso::PsoConfig;
/// use u_calendar::scheduler::EventScheduler;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
/// let events = vec![
///     Event::new("E1", today, NaiveTime::from_hms_opt(8, 0, 0).unwrap())
///         .with_name("Standup")
///         .with_participant("alice"),
/// ];
/// let mut directory = Directory::new().with_participant(Participant::new("alice"));
/// let config = SchedulerConfig::default()
///     .with_pso(PsoConfig::default().with_population_size(10).with_max_iterations(20).with_seed(1))
///     .with_as_of(today);
///
/// let outcome = EventScheduler::run(&events, &mut directory, &config).unwrap();
/// assert_eq!(outcome.report.committed_count(), 1);
/// assert_eq!(directory.calendar("alice").unwrap().len(), 1);
/// ```
pub struct EventScheduler;

impl EventScheduler {
    /// Runs the full pipeline.
    ///
    /// # Errors
    /// - `InvalidConfig` if the configuration fails validation.
    /// - `InvalidInput` if the events fail validation.
    ///
    /// An infeasible batch is not an error: the least-bad schedule is
    /// committed best-effort and the penalty reports how bad it is.
    pub fn run(
        events: &[Event],
        directory: &mut Directory,
        config: &SchedulerConfig,
    ) -> Result<ScheduleOutcome, SchedulingError> {
        validate_config(config).map_err(SchedulingError::InvalidConfig)?;
        validate_events(events).map_err(SchedulingError::InvalidInput)?;

        let as_of = config.resolve_as_of();
        info!(
            "Scheduling {} events for {} participants as of {}",
            events.len(),
            directory.len(),
            as_of
        );

        let (result, breakdown) = {
            let objective = Objective::new(
                events,
                directory,
                config.policy.clone(),
                config.weights.clone(),
                as_of,
            );
            let problem = EventSchedulingProblem::new(objective);
            let result = PsoRunner::run(&problem, &config.pso)?;
            let breakdown = problem.objective().breakdown(&result.best_position);
            (result, breakdown)
        };

        let report = ScheduleCommitter::commit(events, &result.best_position, directory)?;
        let kpi = ScheduleKpi::calculate(events, &result.best_position, &report, &breakdown);

        info!(
            "Scheduling finished: penalty {:.3} after {} generations ({} restarts), {} entries committed, {} skipped",
            result.best_penalty,
            result.generations,
            result.restarts,
            report.committed_count(),
            report.skipped_count()
        );

        Ok(ScheduleOutcome {
            result,
            breakdown,
            report,
            kpi,
        })
    }
}
