//! Memetic local search on the global best
//!
//! Two variants are available: a deterministic coordinate descent with a fixed
//! probe of 1% of the domain width, and an adaptive-step search that perturbs
//! one coordinate at a time with Gaussian noise and grows or shrinks the
//! per-coordinate step after each probe.
//!
//! Both accept strict improvements only, so the candidate handed in is never
//! made worse.

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::budget::RunContext;
use crate::diagnostics::convergence::StagnationTracker;
use crate::error::FireflyResult;
use crate::firefly::config::{AdaptiveStepConfig, FireflyConfig, LocalSearchVariant};
use crate::oracle::traits::FitnessOracle;
use crate::space::bounds::Bounds;
use crate::swarm::candidate::Candidate;

/// Fraction of the domain width used by coordinate descent probes
pub const COORDINATE_STEP_FRACTION: f64 = 0.01;

/// What a single local search call did
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalSearchOutcome {
    /// Oracle calls made
    pub evaluations: usize,
    /// Whether the candidate improved
    pub improved: bool,
}

/// Local search state for one run
#[derive(Clone, Debug)]
pub struct LocalSearch {
    variant: LocalSearchVariant,
    bounds: Bounds,
    report_interval: usize,
    spend_cap: usize,
    spent: usize,
}

impl LocalSearch {
    /// Build from a configuration
    pub fn from_config(config: &FireflyConfig) -> FireflyResult<Self> {
        let spend_cap = match &config.local_search {
            LocalSearchVariant::CoordinateDescent { .. } => config.max_fes,
            LocalSearchVariant::AdaptiveStep(cfg) => {
                (cfg.budget_fraction * config.max_fes as f64).floor() as usize
            }
        };
        Ok(Self {
            variant: config.local_search.clone(),
            bounds: config.bounds()?,
            report_interval: config.effective_report_interval(),
            spend_cap,
            spent: 0,
        })
    }

    /// Total oracle calls spent by local search so far
    pub fn spent(&self) -> usize {
        self.spent
    }

    /// Most oracle calls local search may spend over the run
    pub fn spend_cap(&self) -> usize {
        self.spend_cap
    }

    /// Whether local search runs after `generation`
    ///
    /// Coordinate descent runs every generation. The adaptive variant runs
    /// every `period`-th generation, or when the global best stagnated for
    /// more than one report interval, as long as its share of the budget
    /// is not used up.
    pub fn should_run(
        &self,
        generation: usize,
        evaluations: usize,
        tracker: &StagnationTracker,
    ) -> bool {
        match &self.variant {
            LocalSearchVariant::CoordinateDescent { .. } => true,
            LocalSearchVariant::AdaptiveStep(cfg) => {
                self.spent < self.spend_cap
                    && ((generation + 1) % cfg.period == 0
                        || tracker.is_stagnant(evaluations, self.report_interval))
            }
        }
    }

    /// Try to improve `best` in place
    pub fn improve<O, R>(
        &mut self,
        best: &mut Candidate,
        oracle: &mut O,
        ctx: &mut RunContext<R>,
    ) -> LocalSearchOutcome
    where
        O: FitnessOracle + ?Sized,
        R: Rng,
    {
        let mut working = best.clone();
        let allowance = self.spend_cap.saturating_sub(self.spent);
        let evaluations = match &self.variant {
            LocalSearchVariant::CoordinateDescent { sweeps } => {
                coordinate_descent(&mut working, *sweeps, &self.bounds, oracle, ctx)
            }
            LocalSearchVariant::AdaptiveStep(cfg) => {
                adaptive_step(&mut working, cfg, &self.bounds, allowance, oracle, ctx)
            }
        };
        self.spent += evaluations;

        let improved = working.is_better_than(best);
        if working.fitness <= best.fitness {
            *best = working;
        }
        debug!(
            evaluations,
            improved,
            fitness = best.fitness,
            "local search finished"
        );
        LocalSearchOutcome {
            evaluations,
            improved,
        }
    }
}

/// Up to `sweeps` passes of `+1%` probes on every coordinate
///
/// Returns the number of oracle calls made.
pub fn coordinate_descent<O, R>(
    candidate: &mut Candidate,
    sweeps: usize,
    bounds: &Bounds,
    oracle: &mut O,
    ctx: &mut RunContext<R>,
) -> usize
where
    O: FitnessOracle + ?Sized,
    R: Rng,
{
    let step = bounds.width() * COORDINATE_STEP_FRACTION;
    let start = ctx.evaluations();

    'sweeps: for _ in 0..sweeps {
        for k in 0..candidate.dimension() {
            let original = candidate.position[k];
            candidate.position[k] = bounds.clamp(original + step);
            match ctx.try_fitness(oracle, &candidate.position) {
                Some(fitness) if fitness < candidate.fitness => candidate.fitness = fitness,
                Some(_) => candidate.position[k] = original,
                None => {
                    candidate.position[k] = original;
                    break 'sweeps;
                }
            }
        }
    }

    ctx.evaluations() - start
}

/// Adaptive-step search with at most `allowance` oracle calls
///
/// Returns the number of oracle calls made.
pub fn adaptive_step<O, R>(
    candidate: &mut Candidate,
    config: &AdaptiveStepConfig,
    bounds: &Bounds,
    allowance: usize,
    oracle: &mut O,
    ctx: &mut RunContext<R>,
) -> usize
where
    O: FitnessOracle + ?Sized,
    R: Rng,
{
    let mut steps = vec![config.initial_step_fraction * bounds.width(); candidate.dimension()];
    let mut used = 0;

    'search: loop {
        let mut active = false;
        for k in 0..steps.len() {
            if steps[k] < config.min_step {
                continue;
            }
            active = true;
            if used >= allowance {
                break 'search;
            }

            let original = candidate.position[k];
            let z: f64 = ctx.rng().sample(StandardNormal);
            candidate.position[k] = bounds.clamp(original + z * steps[k]);
            match ctx.try_fitness(oracle, &candidate.position) {
                Some(fitness) => {
                    used += 1;
                    if fitness < candidate.fitness {
                        candidate.fitness = fitness;
                        steps[k] *= config.expansion;
                    } else {
                        candidate.position[k] = original;
                        steps[k] *= config.contraction;
                    }
                }
                None => {
                    candidate.position[k] = original;
                    break 'search;
                }
            }
        }
        if !active {
            break;
        }
    }

    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::traits::FnOracle;
    use approx::assert_relative_eq;

    fn sphere() -> FnOracle<impl FnMut(&[f64]) -> f64> {
        FnOracle::new(|x: &[f64]| x.iter().map(|v| v * v).sum())
    }

    fn evaluated(position: Vec<f64>) -> Candidate {
        let fitness = position.iter().map(|v| v * v).sum();
        Candidate::with_fitness(position, fitness)
    }

    #[test]
    fn test_coordinate_descent_walks_uphill_coordinates() {
        let bounds = Bounds::new(-10.0, 10.0).unwrap();
        let mut candidate = evaluated(vec![-1.0, 1.0]);
        let mut oracle = sphere();
        let mut ctx = RunContext::seeded(0, 1000);

        let used = coordinate_descent(&mut candidate, 3, &bounds, &mut oracle, &mut ctx);

        assert_eq!(used, 6);
        // +0.2 helps the negative coordinate only
        assert_relative_eq!(candidate.position[0], -0.4, epsilon = 1e-12);
        assert_relative_eq!(candidate.position[1], 1.0);
        assert_relative_eq!(candidate.fitness, 0.16 + 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_coordinate_descent_respects_budget() {
        let bounds = Bounds::new(-10.0, 10.0).unwrap();
        let mut candidate = evaluated(vec![-5.0, -5.0, -5.0]);
        let mut oracle = sphere();
        let mut ctx = RunContext::seeded(0, 4);

        let used = coordinate_descent(&mut candidate, 10, &bounds, &mut oracle, &mut ctx);

        assert_eq!(used, 4);
        assert!(ctx.is_exhausted());
        assert!(bounds.contains_vec(&candidate.position));
    }

    #[test]
    fn test_coordinate_descent_clamps_probe() {
        let bounds = Bounds::new(-1.0, 1.0).unwrap();
        let mut candidate = Candidate::with_fitness(vec![1.0], 5.0);
        let mut oracle = FnOracle::new(|x: &[f64]| -x[0]);
        let mut ctx = RunContext::seeded(0, 100);

        coordinate_descent(&mut candidate, 2, &bounds, &mut oracle, &mut ctx);

        assert_eq!(candidate.position, vec![1.0]);
        assert_relative_eq!(candidate.fitness, -1.0);
    }

    #[test]
    fn test_adaptive_step_never_worsens() {
        let bounds = Bounds::new(-10.0, 10.0).unwrap();
        let mut oracle = sphere();
        let mut ctx = RunContext::seeded(17, 10_000);
        let config = AdaptiveStepConfig::default();

        let mut candidate = evaluated(vec![3.0, -2.0, 4.0]);
        let before = candidate.fitness;
        let used = adaptive_step(&mut candidate, &config, &bounds, 500, &mut oracle, &mut ctx);

        assert!(used <= 500);
        assert!(candidate.fitness <= before);
        assert!(candidate.fitness < 1.0);
        assert!(bounds.contains_vec(&candidate.position));
    }

    #[test]
    fn test_adaptive_step_stops_when_steps_collapse() {
        let bounds = Bounds::new(-10.0, 10.0).unwrap();
        // Flat landscape: every probe is rejected so steps shrink to nothing
        let mut oracle = FnOracle::new(|_: &[f64]| 1.0);
        let mut ctx = RunContext::seeded(3, 100_000);
        let config = AdaptiveStepConfig::default();

        let mut candidate = Candidate::with_fitness(vec![0.0, 0.0], 1.0);
        let used = adaptive_step(&mut candidate, &config, &bounds, usize::MAX, &mut oracle, &mut ctx);

        // 2.0 * 0.5^n < 1e-6 after 21 halvings, for each coordinate
        assert_eq!(used, 2 * 21);
        assert_eq!(candidate.position, vec![0.0, 0.0]);
    }

    #[test]
    fn test_adaptive_trigger_and_spend_cap() {
        let config = FireflyConfig::builder()
            .max_fes(1000)
            .report_interval(100)
            .mode(crate::firefly::config::SearchMode::LocalSearch)
            .adaptive_step()
            .build()
            .unwrap();
        let mut search = LocalSearch::from_config(&config).unwrap();
        assert_eq!(search.spend_cap(), 200);

        let mut tracker = StagnationTracker::new();
        tracker.observe(5.0, 300);
        assert!(!search.should_run(0, 320, &tracker));
        assert!(search.should_run(4, 320, &tracker));
        assert!(search.should_run(0, 401, &tracker));

        let mut oracle = sphere();
        let mut ctx = RunContext::seeded(1, 10_000);
        let mut best = evaluated(vec![50.0, -50.0]);
        let outcome = search.improve(&mut best, &mut oracle, &mut ctx);
        assert!(outcome.evaluations <= 200);
        assert_eq!(search.spent(), outcome.evaluations);
    }

    #[test]
    fn test_coordinate_descent_always_triggers() {
        let config = FireflyConfig::builder().coordinate_descent(10).build().unwrap();
        let search = LocalSearch::from_config(&config).unwrap();
        assert!(search.should_run(0, 0, &StagnationTracker::new()));
    }
}
