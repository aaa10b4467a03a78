//! Scheduler configuration.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::horizon::SchedulingPolicy;
use crate::objective::PenaltyWeights;
use crate::pso::PsoConfig;

/// Everything a scheduling run needs besides its inputs.
///
/// Every field has a default, so partial JSON documents load.
///
/// # Example
/// ```
/// use u_calendar::config::SchedulerConfig;
/// use u_calendar::pso::PsoConfig;
///
/// let config = SchedulerConfig::default()
///     .with_pso(PsoConfig::default().with_population_size(20).with_seed(3));
/// assert_eq!(config.pso.population_size, 20);
/// assert!(config.as_of.is_none());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Swarm parameters.
    pub pso: PsoConfig,
    /// Horizon and time-window rules.
    pub policy: SchedulingPolicy,
    /// Penalty weights.
    pub weights: PenaltyWeights,
    /// Reference date for horizons. `None` uses the local date at run start.
    pub as_of: Option<NaiveDate>,
}

impl SchedulerConfig {
    /// Sets the swarm parameters.
    pub fn with_pso(mut self, pso: PsoConfig) -> Self {
        self.pso = pso;
        self
    }

    /// Sets the horizon policy.
    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Pins the reference date.
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// The reference date, reading the clock if none is pinned.
    pub fn resolve_as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "pso": { "population_size": 12, "parallel": true },
            "as_of": "2024-05-06"
        }"#;
        let config: SchedulerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.pso.population_size, 12);
        assert!(config.pso.parallel);
        assert_eq!(config.pso.max_iterations, PsoConfig::default().max_iterations);
        assert_eq!(config.policy, SchedulingPolicy::default());
        assert_eq!(config.weights, PenaltyWeights::default());
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2024, 5, 6));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SchedulerConfig::default()
            .with_policy(SchedulingPolicy::default().with_regular_horizon(14))
            .with_as_of(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        let json = serde_json::to_string(&config).unwrap();
        let back: SchedulerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_resolve_as_of_pinned() {
        let day = NaiveDate::from_ymd_opt(2030, 2, 1).unwrap();
        assert_eq!(SchedulerConfig::default().with_as_of(day).resolve_as_of(), day);
    }
}
