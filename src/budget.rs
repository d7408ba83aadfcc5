//! Evaluation budget and per-run context
//!
//! Every oracle call made by the optimizer goes through [`RunContext`], which
//! owns the seeded random source and the evaluation counter for one run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::oracle::traits::FitnessOracle;
use crate::swarm::candidate::Candidate;

/// Monotonic counter of oracle calls with a hard cap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationBudget {
    max: usize,
    used: usize,
}

impl EvaluationBudget {
    /// Create a budget allowing `max` oracle calls
    pub fn new(max: usize) -> Self {
        Self { max, used: 0 }
    }

    /// Oracle calls made so far
    pub fn used(&self) -> usize {
        self.used
    }

    /// Maximum number of oracle calls
    pub fn max(&self) -> usize {
        self.max
    }

    /// Calls left before exhaustion
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.used)
    }

    /// Whether no further calls are allowed
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.max
    }

    /// Reset the counter to zero
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Record one oracle call
    fn record(&mut self) {
        self.used += 1;
    }
}

/// Per-run state threaded through every component
///
/// Holds the random source and the evaluation budget so that two runs never
/// share mutable state.
#[derive(Clone, Debug)]
pub struct RunContext<R: Rng = StdRng> {
    rng: R,
    budget: EvaluationBudget,
}

impl RunContext<StdRng> {
    /// Context with a deterministic `StdRng`
    pub fn seeded(seed: u64, max_evaluations: usize) -> Self {
        Self::new(StdRng::seed_from_u64(seed), max_evaluations)
    }

    /// Context seeded from OS entropy
    pub fn from_entropy(max_evaluations: usize) -> Self {
        Self::new(StdRng::from_entropy(), max_evaluations)
    }
}

impl<R: Rng> RunContext<R> {
    /// Context around an existing random source
    pub fn new(rng: R, max_evaluations: usize) -> Self {
        Self {
            rng,
            budget: EvaluationBudget::new(max_evaluations),
        }
    }

    /// The random source
    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    /// The evaluation budget
    pub fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    /// Oracle calls made so far
    pub fn evaluations(&self) -> usize {
        self.budget.used()
    }

    /// Whether the budget is spent
    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    /// Reset the evaluation counter
    pub fn reset_budget(&mut self) {
        self.budget.reset();
    }

    /// Evaluate `position` unless the budget is spent
    pub fn try_fitness<O>(&mut self, oracle: &mut O, position: &[f64]) -> Option<f64>
    where
        O: FitnessOracle + ?Sized,
    {
        if self.budget.is_exhausted() {
            return None;
        }
        self.budget.record();
        Some(oracle.fitness(position))
    }

    /// Evaluate a candidate in place unless the budget is spent
    ///
    /// Returns `false` (leaving the candidate untouched) when no call was made.
    pub fn evaluate<O>(&mut self, oracle: &mut O, candidate: &mut Candidate) -> bool
    where
        O: FitnessOracle + ?Sized,
    {
        match self.try_fitness(oracle, &candidate.position) {
            Some(fitness) => {
                candidate.fitness = fitness;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::traits::FnOracle;

    #[test]
    fn test_budget_counts_and_exhausts() {
        let mut budget = EvaluationBudget::new(2);
        assert_eq!(budget.remaining(), 2);
        budget.record();
        budget.record();
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining(), 0);
        budget.reset();
        assert_eq!(budget.used(), 0);
        assert_eq!(budget.max(), 2);
    }

    #[test]
    fn test_context_gates_oracle_calls() {
        let mut calls = 0usize;
        let mut oracle = FnOracle::new(|x: &[f64]| {
            calls += 1;
            x[0]
        });
        let mut ctx = RunContext::seeded(0, 3);

        for _ in 0..5 {
            ctx.try_fitness(&mut oracle, &[1.0]);
        }
        assert_eq!(ctx.evaluations(), 3);
        assert!(ctx.is_exhausted());
        drop(oracle);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_context_reset_reopens_budget() {
        let mut oracle = FnOracle::new(|x: &[f64]| x[0]);
        let mut ctx = RunContext::seeded(0, 2);
        ctx.try_fitness(&mut oracle, &[1.0]);
        ctx.try_fitness(&mut oracle, &[1.0]);
        assert!(ctx.is_exhausted());

        ctx.reset_budget();
        assert_eq!(ctx.evaluations(), 0);
        assert_eq!(ctx.try_fitness(&mut oracle, &[4.0]), Some(4.0));
    }

    #[test]
    fn test_context_evaluate_candidate() {
        let mut oracle = FnOracle::new(|x: &[f64]| x.iter().sum());
        let mut ctx = RunContext::seeded(0, 1);

        let mut a = Candidate::new(vec![1.0, 2.0]);
        assert!(ctx.evaluate(&mut oracle, &mut a));
        assert_eq!(a.fitness, 3.0);

        let mut b = Candidate::new(vec![5.0]);
        assert!(!ctx.evaluate(&mut oracle, &mut b));
        assert!(!b.is_evaluated());
    }

    #[test]
    fn test_seeded_context_is_deterministic() {
        let mut a = RunContext::seeded(42, 10);
        let mut b = RunContext::seeded(42, 10);
        let xs: Vec<f64> = (0..5).map(|_| a.rng().gen()).collect();
        let ys: Vec<f64> = (0..5).map(|_| b.rng().gen()).collect();
        assert_eq!(xs, ys);
    }
}
