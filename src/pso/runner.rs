//! PSO generational loop.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use super::{Particle, PsoConfig, PsoProblem};
use crate::error::SchedulingError;
use crate::validation::validate_pso_config;

/// Outcome of a PSO run.
#[derive(Debug, Clone)]
pub struct PsoResult {
    /// Best position seen during the run.
    ///
    /// This is an elite copy kept across restarts, so it can differ from
    /// `final_swarm_best` when a restart discarded a better swarm.
    pub best_position: Vec<f64>,
    /// Penalty of `best_position`.
    pub best_penalty: f64,
    /// Generations executed after initialization.
    pub generations: usize,
    /// Number of stagnation restarts.
    pub restarts: usize,
    /// Swarm global-best penalty after initialization (index 0) and after
    /// each generation. Resets to `+inf` where a restart happened.
    pub history: Vec<f64>,
    /// Indices into `history` at which a restart happened.
    pub restart_generations: Vec<usize>,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// The swarm's own global best when the budget ran out, as
    /// `(position, penalty)`. `None` if a restart happened in the last
    /// generation and nothing has been evaluated since.
    pub final_swarm_best: Option<(Vec<f64>, f64)>,
}

#[derive(Debug)]
struct BestState {
    position: Option<Vec<f64>>,
    penalty: f64,
}

/// The swarm's best position, shared by all particles.
///
/// Writers only replace the value when they bring a strictly lower
/// penalty, so concurrent offers reduce to the minimum in any order.
#[derive(Debug)]
pub struct GlobalBest {
    state: Mutex<BestState>,
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self::new()
    }
}

impl GlobalBest {
    /// Creates an empty global best (`+inf`).
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BestState {
                position: None,
                penalty: f64::INFINITY,
            }),
        }
    }

    /// Replaces the best if `penalty` is strictly lower. Returns whether it did.
    pub fn offer(&self, position: &[f64], penalty: f64) -> bool {
        let mut state = self.lock();
        if penalty < state.penalty {
            state.penalty = penalty;
            state.position = Some(position.to_vec());
            true
        } else {
            false
        }
    }

    /// Current best penalty.
    pub fn penalty(&self) -> f64 {
        self.lock().penalty
    }

    /// Copy of the current best position and penalty.
    pub fn snapshot(&self) -> Option<(Vec<f64>, f64)> {
        let state = self.lock();
        state.position.clone().map(|p| (p, state.penalty))
    }

    /// Forgets the best (back to `+inf`).
    pub fn reset(&self) {
        let mut state = self.lock();
        state.position = None;
        state.penalty = f64::INFINITY;
    }

    fn lock(&self) -> MutexGuard<'_, BestState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Executes PSO runs.
pub struct PsoRunner;

impl PsoRunner {
    /// Runs the swarm on `problem`.
    ///
    /// # Errors
    /// - `InvalidConfig` if the configuration fails validation.
    /// - `DimensionMismatch` if `initialize` returns a position of the wrong length.
    pub fn run<P: PsoProblem>(problem: &P, config: &PsoConfig) -> Result<PsoResult, SchedulingError> {
        validate_pso_config(config).map_err(SchedulingError::InvalidConfig)?;

        let mut master = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };
        let n = config.population_size;
        let global = GlobalBest::new();

        let mut particles = Self::spawn(problem, config, &mut master)?;
        let everyone = vec![true; n];
        Self::evaluate(problem, config, &mut particles, &everyone, &global);
        let mut evaluations = n;

        let mut elite = global.snapshot();
        let mut history = vec![global.penalty()];
        let mut restart_generations = Vec::new();
        let mut restarts = 0;
        let mut stagnant = 0;

        for iteration in 0..config.max_iterations {
            let inertia = config.inertia_at(iteration);
            let selected = Self::select(config, &mut master);
            let seeds: Vec<u64> = (0..n).map(|_| master.random()).collect();

            // Update phase reads a snapshot fixed before any particle moves
            let swarm_best = global.snapshot().map(|(p, _)| p);
            Self::update(config, &mut particles, &selected, &seeds, swarm_best.as_deref(), inertia);

            let improved = Self::evaluate(problem, config, &mut particles, &selected, &global);
            evaluations += selected.iter().filter(|s| **s).count();

            if let Some((position, penalty)) = global.snapshot() {
                if elite.as_ref().map_or(true, |(_, best)| penalty < *best) {
                    elite = Some((position, penalty));
                }
            }

            if improved {
                stagnant = 0;
            } else {
                stagnant += 1;
            }

            if config.stagnation_limit > 0 && stagnant >= config.stagnation_limit {
                debug!(
                    "PSO restart at generation {} after {} stagnant generations (best {:.3})",
                    iteration + 1,
                    stagnant,
                    global.penalty()
                );
                particles = Self::spawn(problem, config, &mut master)?;
                global.reset();
                stagnant = 0;
                restarts += 1;
                restart_generations.push(iteration + 1);
            }

            trace!("PSO generation {}: best {:.3}", iteration + 1, global.penalty());
            history.push(global.penalty());
        }

        let final_swarm_best = global.snapshot();
        let (best_position, best_penalty) = match elite {
            Some(best) => best,
            // Every evaluation returned a non-comparable penalty; keep the first particle
            None => (particles[0].position.clone(), f64::INFINITY),
        };

        Ok(PsoResult {
            best_position,
            best_penalty,
            generations: config.max_iterations,
            restarts,
            history,
            restart_generations,
            evaluations,
            final_swarm_best,
        })
    }

    /// Draws a fresh population at rest.
    fn spawn<P: PsoProblem>(
        problem: &P,
        config: &PsoConfig,
        master: &mut SmallRng,
    ) -> Result<Vec<Particle>, SchedulingError> {
        let seeds: Vec<u64> = (0..config.population_size).map(|_| master.random()).collect();
        let draw = |seed: &u64| {
            let mut rng = SmallRng::seed_from_u64(*seed);
            problem.initialize(&mut rng)
        };
        let positions: Vec<Vec<f64>> = if config.parallel {
            seeds.par_iter().map(draw).collect()
        } else {
            seeds.iter().map(draw).collect()
        };

        let expected = problem.dimensions();
        if let Some(bad) = positions.iter().find(|p| p.len() != expected) {
            return Err(SchedulingError::DimensionMismatch {
                expected,
                actual: bad.len(),
            });
        }
        Ok(positions.into_iter().map(Particle::new).collect())
    }

    /// Chooses which particles move this generation (without replacement).
    fn select(config: &PsoConfig, master: &mut SmallRng) -> Vec<bool> {
        let n = config.population_size;
        let k = config.sample_size();
        if k >= n {
            return vec![true; n];
        }
        let mut selected = vec![false; n];
        for i in rand::seq::index::sample(master, n, k).iter() {
            selected[i] = true;
        }
        selected
    }

    fn update(
        config: &PsoConfig,
        particles: &mut [Particle],
        selected: &[bool],
        seeds: &[u64],
        swarm_best: Option<&[f64]>,
        inertia: f64,
    ) {
        let step = |((particle, seed), chosen): ((&mut Particle, &u64), &bool)| {
            if !*chosen {
                return;
            }
            let mut rng = SmallRng::seed_from_u64(*seed);
            // Before any evaluation succeeds the particle follows only itself
            let target = swarm_best.map_or_else(|| particle.best_position.clone(), <[f64]>::to_vec);
            particle.step(&target, inertia, config.cognitive, config.social, &mut rng);
        };

        if config.parallel {
            particles
                .par_iter_mut()
                .zip(seeds.par_iter())
                .zip(selected.par_iter())
                .for_each(step);
        } else {
            particles
                .iter_mut()
                .zip(seeds.iter())
                .zip(selected.iter())
                .for_each(step);
        }
    }

    /// Scores selected particles; returns whether the global best improved.
    fn evaluate<P: PsoProblem>(
        problem: &P,
        config: &PsoConfig,
        particles: &mut [Particle],
        selected: &[bool],
        global: &GlobalBest,
    ) -> bool {
        let score = |(particle, chosen): (&mut Particle, &bool)| {
            if !*chosen {
                return false;
            }
            let penalty = problem.evaluate(&particle.position);
            particle.record(penalty) && global.offer(&particle.best_position, particle.best_penalty)
        };

        if config.parallel {
            particles
                .par_iter_mut()
                .zip(selected.par_iter())
                .map(score)
                .reduce(|| false, |a, b| a || b)
        } else {
            particles
                .iter_mut()
                .zip(selected.iter())
                .map(score)
                .fold(false, |a, b| a || b)
        }
    }
}
