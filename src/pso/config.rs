//! PSO configuration.

use serde::{Deserialize, Serialize};

/// Swarm parameters.
///
/// # Example
/// ```
/// use u_calendar::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_population_size(40)
///     .with_max_iterations(200)
///     .with_inertia(0.9, 0.4)
///     .with_seed(7);
/// assert_eq!(config.population_size, 40);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PsoConfig {
    /// Number of particles.
    pub population_size: usize,
    /// Generations after initialization. Zero evaluates the initial swarm only.
    pub max_iterations: usize,
    /// Inertia weight at the first generation.
    pub inertia_start: f64,
    /// Inertia weight at the last generation.
    pub inertia_floor: f64,
    /// Pull toward the particle's own best (c1).
    pub cognitive: f64,
    /// Pull toward the swarm's best (c2).
    pub social: f64,
    /// Generations without improvement before a restart. Zero disables restarts.
    pub stagnation_limit: usize,
    /// Share of particles moved per generation, in (0, 1].
    pub update_fraction: f64,
    /// Run update/evaluation phases on the rayon pool.
    pub parallel: bool,
    /// RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            max_iterations: 100,
            inertia_start: 0.9,
            inertia_floor: 0.4,
            cognitive: 1.5,
            social: 1.5,
            stagnation_limit: 10,
            update_fraction: 1.0,
            parallel: false,
            seed: None,
        }
    }
}

impl PsoConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the inertia schedule (start → floor).
    pub fn with_inertia(mut self, start: f64, floor: f64) -> Self {
        self.inertia_start = start;
        self.inertia_floor = floor;
        self
    }

    /// Sets the cognitive and social coefficients.
    pub fn with_coefficients(mut self, cognitive: f64, social: f64) -> Self {
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    /// Sets the stagnation limit (0 = never restart).
    pub fn with_stagnation_limit(mut self, generations: usize) -> Self {
        self.stagnation_limit = generations;
        self
    }

    /// Sets the share of particles moved per generation.
    pub fn with_update_fraction(mut self, fraction: f64) -> Self {
        self.update_fraction = fraction;
        self
    }

    /// Enables or disables parallel generations.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Fixes the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Inertia weight for a generation: linear decay from start to floor.
    pub fn inertia_at(&self, iteration: usize) -> f64 {
        if self.max_iterations == 0 {
            return self.inertia_start;
        }
        let progress = iteration.min(self.max_iterations) as f64 / self.max_iterations as f64;
        self.inertia_start - (self.inertia_start - self.inertia_floor) * progress
    }

    /// Number of particles moved per generation.
    pub fn sample_size(&self) -> usize {
        let n = self.population_size;
        if n == 0 {
            return 0;
        }
        ((n as f64 * self.update_fraction).ceil() as usize).clamp(1, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let c = PsoConfig::default()
            .with_population_size(10)
            .with_max_iterations(20)
            .with_coefficients(1.0, 2.0)
            .with_stagnation_limit(0)
            .with_parallel(true)
            .with_seed(3);
        assert_eq!(c.population_size, 10);
        assert_eq!(c.max_iterations, 20);
        assert_eq!(c.cognitive, 1.0);
        assert_eq!(c.social, 2.0);
        assert_eq!(c.stagnation_limit, 0);
        assert!(c.parallel);
        assert_eq!(c.seed, Some(3));
    }

    #[test]
    fn test_inertia_decay() {
        let c = PsoConfig::default()
            .with_max_iterations(10)
            .with_inertia(0.9, 0.4);
        assert!((c.inertia_at(0) - 0.9).abs() < 1e-12);
        assert!((c.inertia_at(5) - 0.65).abs() < 1e-12);
        assert!((c.inertia_at(10) - 0.4).abs() < 1e-12);
        assert!((c.inertia_at(99) - 0.4).abs() < 1e-12);
        for i in 1..10 {
            assert!(c.inertia_at(i) < c.inertia_at(i - 1));
        }
    }

    #[test]
    fn test_sample_size() {
        let c = PsoConfig::default().with_population_size(9);
        assert_eq!(c.sample_size(), 9);
        assert_eq!(c.clone().with_update_fraction(0.5).sample_size(), 5);
        assert_eq!(c.with_update_fraction(0.01).sample_size(), 1);
        assert_eq!(PsoConfig::default().with_population_size(0).sample_size(), 0);
    }

    #[test]
    fn test_serde_defaults() {
        let c: PsoConfig = serde_json::from_str(r#"{"population_size": 12}"#).unwrap();
        assert_eq!(c.population_size, 12);
        assert_eq!(c.max_iterations, 100);
        assert_eq!(c.seed, None);
    }
}
