//! Input and configuration validation.
//!
//! Runs before optimization and reports every problem at once instead of
//! stopping at the first. Detects:
//! - Duplicate event IDs and repeated participants within an event
//! - Empty populations and unusable swarm coefficients
//! - Inverted work windows, horizons, and full-day bands
//! - Negative or non-finite penalty weights

use std::collections::HashSet;
use std::fmt;

use crate::config::SchedulerConfig;
use crate::horizon::SchedulingPolicy;
use crate::models::Event;
use crate::objective::PenaltyWeights;
use crate::pso::PsoConfig;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two events share the same ID.
    DuplicateId,
    /// An event lists the same participant twice.
    DuplicateParticipant,
    /// Population size is zero.
    EmptyPopulation,
    /// A swarm coefficient is negative or not finite.
    InvalidCoefficient,
    /// Inertia floor above inertia start.
    InvertedInertia,
    /// Update fraction outside (0, 1].
    InvalidUpdateFraction,
    /// Work window empty or outside a day.
    InvalidWorkWindow,
    /// Granularity not positive.
    InvalidGranularity,
    /// Extended priority horizon shorter than the base one.
    InvalidHorizon,
    /// Full-day band inverted or negative.
    InvalidFullDayBand,
    /// A penalty weight is negative or not finite.
    InvalidWeight,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Joins error messages for display.
pub(crate) fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the pending events.
///
/// Checks:
/// 1. No duplicate event IDs
/// 2. No participant listed twice on the same event
pub fn validate_events(events: &[Event]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for event in events {
        if !ids.insert(event.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event ID: {}", event.id),
            ));
        }

        let mut seen = HashSet::new();
        for participant in &event.participants {
            if !seen.insert(participant.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateParticipant,
                    format!(
                        "Event '{}' lists participant '{}' more than once",
                        event.id, participant
                    ),
                ));
            }
        }
    }

    finish(errors)
}

/// Validates swarm parameters.
pub fn validate_pso_config(config: &PsoConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.population_size == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPopulation,
            "Population size must be at least 1",
        ));
    }

    for (name, value) in [
        ("inertia_start", config.inertia_start),
        ("inertia_floor", config.inertia_floor),
        ("cognitive", config.cognitive),
        ("social", config.social),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCoefficient,
                format!("Coefficient '{name}' must be finite and non-negative, got {value}"),
            ));
        }
    }

    if config.inertia_floor > config.inertia_start {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvertedInertia,
            format!(
                "Inertia floor {} exceeds inertia start {}",
                config.inertia_floor, config.inertia_start
            ),
        ));
    }

    if !(config.update_fraction > 0.0 && config.update_fraction <= 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidUpdateFraction,
            format!(
                "Update fraction must be in (0, 1], got {}",
                config.update_fraction
            ),
        ));
    }

    finish(errors)
}

/// Validates horizon and time-window rules.
pub fn validate_policy(policy: &SchedulingPolicy) -> ValidationResult {
    let mut errors = Vec::new();
    let window = policy.work_window;

    if !(window.start >= 0.0 && window.end <= 24.0 && window.start < window.end) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWorkWindow,
            format!(
                "Work window [{}, {}) must be non-empty and within a day",
                window.start, window.end
            ),
        ));
    }

    if !(policy.granularity_hours.is_finite() && policy.granularity_hours > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGranularity,
            format!(
                "Granularity must be positive, got {}",
                policy.granularity_hours
            ),
        ));
    }

    if policy.extended_priority_horizon_days < policy.priority_horizon_days {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHorizon,
            format!(
                "Extended priority horizon ({} days) is shorter than the base one ({} days)",
                policy.extended_priority_horizon_days, policy.priority_horizon_days
            ),
        ));
    }

    if !(policy.full_day_min_hours >= 0.0 && policy.full_day_min_hours <= policy.full_day_max_hours)
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidFullDayBand,
            format!(
                "Full-day band [{}, {}] is invalid",
                policy.full_day_min_hours, policy.full_day_max_hours
            ),
        ));
    }

    finish(errors)
}

/// Validates a whole scheduler configuration.
///
/// Collects swarm, policy, and weight errors together.
pub fn validate_config(config: &SchedulerConfig) -> ValidationResult {
    let errors: Vec<ValidationError> = [
        validate_pso_config(&config.pso),
        validate_policy(&config.policy),
        validate_weights(&config.weights),
    ]
    .into_iter()
    .filter_map(Result::err)
    .flatten()
    .collect();

    finish(errors)
}

/// Validates penalty weights.
pub fn validate_weights(weights: &PenaltyWeights) -> ValidationResult {
    let errors = [
        ("validity", weights.validity),
        ("overlap", weights.overlap),
        ("day_fit", weights.day_fit),
        ("spread", weights.spread),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_finite() || *value < 0.0)
    .map(|(name, value)| {
        ValidationError::new(
            ValidationErrorKind::InvalidWeight,
            format!("Weight '{name}' must be finite and non-negative, got {value}"),
        )
    })
    .collect();

    finish(errors)
}
