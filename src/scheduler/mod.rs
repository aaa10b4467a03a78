//! Scheduling facade and KPI evaluation.
//!
//! # Algorithm
//!
//! `EventScheduler` optimizes a batch of pending events with particle
//! swarm optimization, then commits the best schedule found into the
//! participants' calendars on a best-effort basis.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a committed batch: completion rate, skipped
//! participants, date span, and total penalty.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod engine;
mod kpi;

pub use engine::{EventScheduler, ScheduleOutcome};
pub use kpi::ScheduleKpi;
