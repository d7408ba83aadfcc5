//! Candidate solution type
//!
//! A candidate is a point in the search space together with its cached fitness.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single firefly: position plus cached fitness (lower is better)
///
/// The fitness is `f64::INFINITY` until the candidate has been evaluated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Coordinates in the search space
    pub position: Vec<f64>,
    /// Cached objective value
    pub fitness: f64,
}

impl Candidate {
    /// Create an unevaluated candidate at the given position
    pub fn new(position: Vec<f64>) -> Self {
        Self {
            position,
            fitness: f64::INFINITY,
        }
    }

    /// Create a candidate with a known fitness
    pub fn with_fitness(position: Vec<f64>, fitness: f64) -> Self {
        Self { position, fitness }
    }

    /// Number of coordinates
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Whether a finite fitness has been recorded
    pub fn is_evaluated(&self) -> bool {
        self.fitness < f64::INFINITY
    }

    /// Strictly lower fitness than `other`
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.fitness < other.fitness
    }

    /// Squared Euclidean distance to another candidate
    pub fn squared_distance(&self, other: &Self) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance to another candidate
    pub fn distance(&self, other: &Self) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Total order on fitness, NaN sorted last
    pub fn cmp_fitness(&self, other: &Self) -> Ordering {
        self.fitness.total_cmp(&other.fitness)
    }
}
