//! Calendar-aware event scheduling for the U-Engine ecosystem.
//!
//! Places a batch of pending events on participants' calendars. Candidate
//! schedules are scored by a weighted penalty and searched with particle
//! swarm optimization; the best one found is committed best-effort.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Event`, `Calendar`, `CalendarEntry`,
//!   `Participant`, `Directory`, `TimeWindow`
//! - **`conflict`**: Overlap and same-day fit checks against calendars
//! - **`horizon`**: Allowed date ranges, daily work window, initial slot sampling
//! - **`objective`**: Weighted penalty over an encoded schedule
//! - **`pso`**: Generic particle swarm optimizer
//! - **`problem`**: Event scheduling expressed as a swarm problem
//! - **`commit`**: Writes the chosen schedule into calendars
//! - **`scheduler`**: End-to-end run and KPIs
//! - **`config`**, **`validation`**, **`error`**: Settings and their checks
//!
//! # Quick Start
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use u_calendar::config::SchedulerConfig;
//! use u_calendar::models::{Directory, Event, Participant};
//! use u_calendar::pso::PsoConfig;
//! use u_calendar::scheduler::EventScheduler;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
//! let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
//! let events = vec![
//!     Event::new("review", today, nine).with_participant("alice").with_participant("bob"),
//!     Event::new("sync", today, nine).with_priority(true).with_participant("alice"),
//! ];
//! let mut directory = Directory::new()
//!     .with_participant(Participant::new("alice"))
//!     .with_participant(Participant::new("bob"));
//! let config = SchedulerConfig::default()
//!     .with_pso(PsoConfig::default().with_population_size(20).with_max_iterations(50).with_seed(7))
//!     .with_as_of(today);
//!
//! let outcome = EventScheduler::run(&events, &mut directory, &config).unwrap();
//! assert!(outcome.result.best_penalty.is_finite());
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

pub mod commit;
pub mod config;
pub mod conflict;
pub mod error;
pub mod horizon;
pub mod models;
pub mod objective;
pub mod problem;
pub mod pso;
pub mod scheduler;
pub mod validation;
