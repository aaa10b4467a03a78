//! Particle Swarm Optimization (PSO).
//!
//! A population of particles moves through a continuous search space.
//! Each particle is pulled toward its own best position (cognitive term)
//! and the swarm's best position (social term), with momentum from an
//! inertia weight that decays linearly over the run.
//!
//! # Extensions
//!
//! - **Stagnation restart**: after `stagnation_limit` generations without
//!   a global-best improvement, the whole population is re-drawn and all
//!   bests are forgotten. The runner still reports the best position seen
//!   across restarts.
//! - **Partial updates**: with `update_fraction < 1`, only a random subset
//!   of particles (drawn without replacement) moves each generation.
//! - **Parallel generations**: update and evaluation phases run on rayon
//!   with a barrier between them. Per-particle RNGs are derived from the
//!   master seed, so parallel and sequential runs agree.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod particle;
mod runner;
mod types;

pub use config::PsoConfig;
pub use particle::Particle;
pub use runner::{GlobalBest, PsoResult, PsoRunner};
pub use types::PsoProblem;
