//! Firefly algorithm
//!
//! Swarm movement toward brighter fireflies, optional intensification, and
//! the controller that drives a run under a fixed evaluation budget.

pub mod config;
pub mod controller;
pub mod elitist;
pub mod local_search;
pub mod movement;

pub mod prelude {
    pub use super::config::*;
    pub use super::controller::{run, FireflyOptimizer, FireflyRun, RunPhase};
    pub use super::elitist::ElitistArchive;
    pub use super::local_search::{LocalSearch, LocalSearchOutcome};
    pub use super::movement::MovementEngine;
}
