//! Diagnostics and statistics
//!
//! Per-generation statistics, progress reporting and the result of a run.

pub mod convergence;
pub mod observer;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::swarm::swarm::Swarm;

/// Statistics for a single generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number
    pub generation: usize,
    /// Total oracle evaluations so far
    pub evaluations: usize,
    /// Global best fitness after this generation
    pub best_fitness: f64,
    /// Best fitness currently in the swarm
    pub swarm_best_fitness: f64,
    /// Worst fitness currently in the swarm
    pub worst_fitness: f64,
    /// Mean fitness of evaluated fireflies
    pub mean_fitness: f64,
    /// Mean pairwise distance in the swarm
    pub diversity: f64,
}

impl GenerationStats {
    /// Compute statistics from a swarm
    pub fn from_swarm(
        swarm: &Swarm,
        generation: usize,
        evaluations: usize,
        best_fitness: f64,
    ) -> Self {
        Self {
            generation,
            evaluations,
            best_fitness,
            swarm_best_fitness: swarm.best().map_or(f64::INFINITY, |c| c.fitness),
            worst_fitness: swarm.worst().map_or(f64::INFINITY, |c| c.fitness),
            mean_fitness: swarm.mean_fitness().unwrap_or(f64::INFINITY),
            diversity: swarm.diversity(),
        }
    }
}

/// Statistics collector for an entire run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Statistics per generation
    pub generations: Vec<GenerationStats>,
    /// Oracle evaluations spent by local search
    pub local_search_evaluations: usize,
    /// Number of elitist reinjections
    pub reinjections: usize,
    /// Total runtime in milliseconds
    pub total_runtime_ms: f64,
}

impl RunStats {
    /// Create a new stats collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a generation's statistics
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Get the number of generations recorded
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Get the final global best fitness
    pub fn final_best_fitness(&self) -> Option<f64> {
        self.generations.last().map(|g| g.best_fitness)
    }

    /// Global best fitness after each generation
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Mean swarm fitness after each generation
    pub fn mean_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.mean_fitness).collect()
    }

    /// Swarm diversity after each generation
    pub fn diversity_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.diversity).collect()
    }

    /// Set the total runtime
    pub fn set_runtime(&mut self, duration: Duration) {
        self.total_runtime_ms = duration.as_secs_f64() * 1000.0;
    }

    /// One-paragraph summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Run Summary:\n\
             - Generations: {}\n\
             - Final best: {:e}\n\
             - Local search evaluations: {}\n\
             - Reinjections: {}\n\
             - Runtime: {:.2}ms",
            self.num_generations(),
            self.final_best_fitness().unwrap_or(f64::INFINITY),
            self.local_search_evaluations,
            self.reinjections,
            self.total_runtime_ms,
        )
    }
}

/// Result of a firefly run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Position of the global best
    pub best_position: Vec<f64>,
    /// Fitness of the global best
    pub best_fitness: f64,
    /// Distance to the known optimum as reported by the oracle
    pub error: f64,
    /// Total oracle evaluations
    pub evaluations: usize,
    /// Generations completed
    pub generations: usize,
    /// Statistics for the run
    pub stats: RunStats,
}

pub mod prelude {
    pub use super::convergence::StagnationTracker;
    pub use super::observer::{NoopObserver, ProgressObserver, ProgressReport, TracingObserver};
    pub use super::{GenerationStats, RunResult, RunStats};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swarm::candidate::Candidate;

    fn stats_row(generation: usize, best: f64) -> GenerationStats {
        GenerationStats {
            generation,
            evaluations: generation * 10,
            best_fitness: best,
            swarm_best_fitness: best,
            worst_fitness: best * 2.0,
            mean_fitness: best * 1.5,
            diversity: 1.0 / (generation + 1) as f64,
        }
    }

    #[test]
    fn test_generation_stats_from_swarm() {
        let swarm = Swarm::from_candidates(vec![
            Candidate::with_fitness(vec![0.0, 0.0], 2.0),
            Candidate::with_fitness(vec![3.0, 4.0], 4.0),
            Candidate::new(vec![1.0, 1.0]),
        ]);
        let stats = GenerationStats::from_swarm(&swarm, 3, 60, 1.5);

        assert_eq!(stats.generation, 3);
        assert_eq!(stats.evaluations, 60);
        assert_eq!(stats.best_fitness, 1.5);
        assert_eq!(stats.swarm_best_fitness, 2.0);
        assert_eq!(stats.worst_fitness, f64::INFINITY);
        assert_eq!(stats.mean_fitness, 3.0);
    }

    #[test]
    fn test_run_stats_history() {
        let mut stats = RunStats::new();
        for (i, best) in [8.0, 4.0, 4.0, 1.0].into_iter().enumerate() {
            stats.record(stats_row(i, best));
        }

        assert_eq!(stats.num_generations(), 4);
        assert_eq!(stats.best_fitness_history(), vec![8.0, 4.0, 4.0, 1.0]);
        assert_eq!(stats.mean_fitness_history()[0], 12.0);
        assert_eq!(stats.final_best_fitness(), Some(1.0));
    }

    #[test]
    fn test_run_stats_summary() {
        let mut stats = RunStats::new();
        stats.record(stats_row(0, 3.0));
        stats.local_search_evaluations = 12;
        stats.set_runtime(Duration::from_millis(250));

        let summary = stats.summary();
        assert!(summary.contains("Generations: 1"));
        assert!(summary.contains("Local search evaluations: 12"));
        assert!(summary.contains("250.00ms"));
    }
}
