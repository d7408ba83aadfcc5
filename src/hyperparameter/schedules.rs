//! Parameter schedules for deterministic control
//!
//! Schedules provide predetermined parameter values based on generation number.

use serde::{Deserialize, Serialize};

/// Parameter schedule trait
///
/// Defines how a parameter changes over the course of a run.
pub trait ParameterSchedule: Send + Sync {
    /// Get the parameter value at a given generation
    fn value_at(&self, generation: usize) -> f64;
}

/// Geometric cooling: p(t) = p₀ · factorᵗ
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeometricCooling {
    /// Value at generation 0
    pub initial: f64,
    /// Multiplicative factor per generation
    pub factor: f64,
}

impl GeometricCooling {
    /// Create a new geometric cooling schedule
    pub fn new(initial: f64, factor: f64) -> Self {
        Self { initial, factor }
    }
}

impl ParameterSchedule for GeometricCooling {
    fn value_at(&self, generation: usize) -> f64 {
        let exponent = i32::try_from(generation).unwrap_or(i32::MAX);
        self.initial * self.factor.powi(exponent)
    }
}
