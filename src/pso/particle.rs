//! Particle state.

use rand::Rng;

/// One candidate-solution tracker.
///
/// The personal best is owned by the particle; the swarm best is only
/// ever read here.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current position.
    pub position: Vec<f64>,
    /// Current velocity (same length as `position`).
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Penalty of `best_position` (`+inf` until first evaluated).
    pub best_penalty: f64,
}

impl Particle {
    /// Creates a particle at rest at `position`.
    pub fn new(position: Vec<f64>) -> Self {
        let dims = position.len();
        Self {
            best_position: position.clone(),
            position,
            velocity: vec![0.0; dims],
            best_penalty: f64::INFINITY,
        }
    }

    /// Records the penalty of the current position.
    ///
    /// Returns `true` if it improved the personal best.
    pub fn record(&mut self, penalty: f64) -> bool {
        if penalty < self.best_penalty {
            self.best_penalty = penalty;
            self.best_position.clone_from(&self.position);
            true
        } else {
            false
        }
    }

    /// Applies one velocity/position step.
    ///
    /// `v = w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x)` and `x += v`, with
    /// fresh `r1, r2 ∈ [0, 1)` per dimension. Positions are not clamped.
    pub fn step<R: Rng>(
        &mut self,
        swarm_best: &[f64],
        inertia: f64,
        cognitive: f64,
        social: f64,
        rng: &mut R,
    ) {
        for (j, x) in self.position.iter_mut().enumerate() {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            let v = inertia * self.velocity[j]
                + cognitive * r1 * (self.best_position[j] - *x)
                + social * r2 * (swarm_best[j] - *x);
            self.velocity[j] = v;
            *x += v;
        }
    }
}
