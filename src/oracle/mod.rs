//! Fitness oracles and benchmarks
//!
//! This module provides the oracle abstraction and a numbered benchmark suite.

pub mod benchmarks;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::traits::*;
}
