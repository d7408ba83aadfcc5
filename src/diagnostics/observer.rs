//! Progress reporting
//!
//! The run controller hands a [`ProgressReport`] to a [`ProgressObserver`]
//! every report interval and once more at termination. Closures taking a
//! report are observers too.

use serde::{Deserialize, Serialize};
use tracing::info;

/// Snapshot handed to observers
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Oracle evaluations so far
    pub evaluations: usize,
    /// Generations completed
    pub generation: usize,
    /// Global best fitness
    pub best_fitness: f64,
}

/// Receiver of periodic progress reports
pub trait ProgressObserver {
    /// Called at the configured cadence
    fn on_progress(&mut self, report: &ProgressReport);

    /// Called once when the run terminates
    fn on_finish(&mut self, report: &ProgressReport) {
        self.on_progress(report);
    }
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressReport),
{
    fn on_progress(&mut self, report: &ProgressReport) {
        self(report)
    }
}

/// Emits reports as `tracing` events
#[derive(Clone, Debug, Default)]
pub struct TracingObserver;

impl ProgressObserver for TracingObserver {
    fn on_progress(&mut self, report: &ProgressReport) {
        info!(
            evaluations = report.evaluations,
            generation = report.generation,
            best_fitness = report.best_fitness,
            "progress"
        );
    }

    fn on_finish(&mut self, report: &ProgressReport) {
        info!(
            evaluations = report.evaluations,
            generation = report.generation,
            best_fitness = report.best_fitness,
            "run finished"
        );
    }
}

/// Discards every report
#[derive(Clone, Debug, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&mut self, _report: &ProgressReport) {}

    fn on_finish(&mut self, _report: &ProgressReport) {}
}
