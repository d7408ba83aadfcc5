//! Hyperparameter control
//!
//! Deterministic schedules for parameters that change over a run, such as the
//! cooling of the movement noise.

pub mod schedules;

pub mod prelude {
    pub use super::schedules::*;
}
