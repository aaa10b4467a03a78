//! Problem definition for the swarm.

use rand::Rng;

/// A minimization problem over fixed-length real vectors.
///
/// The runner owns the search mechanics; implementors only describe the
/// space (dimensionality, how to draw a starting point) and the cost.
pub trait PsoProblem: Send + Sync {
    /// Length of every position vector.
    fn dimensions(&self) -> usize;

    /// Draws a starting position.
    fn initialize<R: Rng>(&self, rng: &mut R) -> Vec<f64>;

    /// Penalty of a position (lower is better, never negative).
    fn evaluate(&self, position: &[f64]) -> f64;
}
