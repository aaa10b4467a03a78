//! Error types.
//!
//! Only misconfiguration is an error. An infeasible batch is not: the
//! optimizer returns its least-bad schedule and the penalty says how bad.

use thiserror::Error;

use crate::validation::{summarize, ValidationError};

/// Errors raised before the optimization loop starts.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Optimizer, policy, or weight settings are unusable.
    #[error("invalid configuration: {}", summarize(.0))]
    InvalidConfig(Vec<ValidationError>),
    /// The pending events are inconsistent.
    #[error("invalid input: {}", summarize(.0))]
    InvalidInput(Vec<ValidationError>),
    /// A position does not have two slots per pending event.
    #[error("position has {actual} dimensions, expected {expected}")]
    DimensionMismatch {
        /// Required length.
        expected: usize,
        /// Observed length.
        actual: usize,
    },
}
