//! Fitness oracle traits
//!
//! The optimizer treats the objective as a black box behind [`FitnessOracle`].

use crate::error::OracleError;

/// Black-box objective consumed by the optimizer (minimization)
///
/// `init` is called exactly once per run, before any call to `fitness`.
pub trait FitnessOracle {
    /// Prepare the oracle for a run of `algorithm_name` on `function_id` in
    /// `dimension` coordinates
    fn init(
        &mut self,
        algorithm_name: &str,
        function_id: usize,
        dimension: usize,
    ) -> Result<(), OracleError>;

    /// Objective value at `position` (lower is better)
    fn fitness(&mut self, position: &[f64]) -> f64;

    /// Deviation of `best_fitness` from the known optimum
    fn error(&self, best_fitness: f64) -> f64;
}

impl<O: FitnessOracle + ?Sized> FitnessOracle for &mut O {
    fn init(
        &mut self,
        algorithm_name: &str,
        function_id: usize,
        dimension: usize,
    ) -> Result<(), OracleError> {
        (**self).init(algorithm_name, function_id, dimension)
    }

    fn fitness(&mut self, position: &[f64]) -> f64 {
        (**self).fitness(position)
    }

    fn error(&self, best_fitness: f64) -> f64 {
        (**self).error(best_fitness)
    }
}

/// Adapter turning a plain closure into an oracle
///
/// `init` always succeeds and `error` is measured against `optimum`
/// (zero unless set).
pub struct FnOracle<F>
where
    F: FnMut(&[f64]) -> f64,
{
    f: F,
    optimum: f64,
}

impl<F> FnOracle<F>
where
    F: FnMut(&[f64]) -> f64,
{
    /// Wrap a closure
    pub fn new(f: F) -> Self {
        Self { f, optimum: 0.0 }
    }

    /// Set the known optimum used by `error`
    pub fn with_optimum(mut self, optimum: f64) -> Self {
        self.optimum = optimum;
        self
    }
}

impl<F> FitnessOracle for FnOracle<F>
where
    F: FnMut(&[f64]) -> f64,
{
    fn init(&mut self, _: &str, _: usize, _: usize) -> Result<(), OracleError> {
        Ok(())
    }

    fn fitness(&mut self, position: &[f64]) -> f64 {
        (self.f)(position)
    }

    fn error(&self, best_fitness: f64) -> f64 {
        best_fitness - self.optimum
    }
}
