//! Stagnation detection
//!
//! Tracks when the global best last improved, measured in oracle evaluations.

use serde::{Deserialize, Serialize};

/// Records the evaluation count of the last global-best improvement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StagnationTracker {
    best_fitness: f64,
    last_improvement_at: usize,
}

impl Default for StagnationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StagnationTracker {
    /// Create a tracker that has seen nothing yet
    pub fn new() -> Self {
        Self {
            best_fitness: f64::INFINITY,
            last_improvement_at: 0,
        }
    }

    /// Best fitness observed so far
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// Evaluation count at the last improvement
    pub fn last_improvement_at(&self) -> usize {
        self.last_improvement_at
    }

    /// Feed the current best; returns true on strict improvement
    pub fn observe(&mut self, best_fitness: f64, evaluations: usize) -> bool {
        if best_fitness < self.best_fitness {
            self.best_fitness = best_fitness;
            self.last_improvement_at = evaluations;
            true
        } else {
            false
        }
    }

    /// Evaluations spent since the last improvement
    pub fn evaluations_since_improvement(&self, evaluations: usize) -> usize {
        evaluations.saturating_sub(self.last_improvement_at)
    }

    /// Whether more than `window` evaluations passed without improvement
    pub fn is_stagnant(&self, evaluations: usize, window: usize) -> bool {
        self.evaluations_since_improvement(evaluations) > window
    }
}
