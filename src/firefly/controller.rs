//! Run controller
//!
//! Drives one optimization run through its phases:
//!
//! 1. `Initializing`: sample the swarm uniformly inside the bounds
//! 2. `EvaluatingInitial`: evaluate each firefly once and take the best
//! 3. `Running`: movement sweep, best rescan, intensification, repeat
//! 4. `Terminated`: the evaluation budget is spent
//!
//! [`FireflyRun`] exposes the phases one [`step`](FireflyRun::step) at a time;
//! [`FireflyOptimizer`] and [`run`] drive a run to completion.

use std::time::Instant;

use tracing::{debug, info_span, trace, Span};

use crate::budget::RunContext;
use crate::diagnostics::convergence::StagnationTracker;
use crate::diagnostics::observer::{ProgressObserver, ProgressReport, TracingObserver};
use crate::diagnostics::{GenerationStats, RunResult, RunStats};
use crate::error::{FireflyError, FireflyResult};
use crate::firefly::config::{FireflyConfig, SearchMode};
use crate::firefly::elitist::ElitistArchive;
use crate::firefly::local_search::LocalSearch;
use crate::firefly::movement::MovementEngine;
use crate::oracle::traits::FitnessOracle;
use crate::space::bounds::Bounds;
use crate::swarm::candidate::Candidate;
use crate::swarm::swarm::Swarm;

/// Lifecycle of a run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Swarm not yet sampled
    Initializing,
    /// Swarm sampled, not yet evaluated
    EvaluatingInitial,
    /// Generational loop
    Running,
    /// Budget spent
    Terminated,
}

/// Per-run intensification state
#[derive(Clone, Debug)]
enum Strategy {
    Basic,
    LocalSearch(LocalSearch),
    Elitist(ElitistArchive),
}

impl Strategy {
    fn from_config(config: &FireflyConfig) -> FireflyResult<Self> {
        Ok(match config.mode {
            SearchMode::Basic => Strategy::Basic,
            SearchMode::LocalSearch => Strategy::LocalSearch(LocalSearch::from_config(config)?),
            SearchMode::Elitist => Strategy::Elitist(ElitistArchive::from_config(config)),
        })
    }
}

/// A single run that can be advanced step by step
pub struct FireflyRun<O, P = TracingObserver>
where
    O: FitnessOracle,
    P: ProgressObserver,
{
    config: FireflyConfig,
    oracle: O,
    observer: P,
    ctx: RunContext,
    bounds: Bounds,
    dimension: usize,
    phase: RunPhase,
    swarm: Swarm,
    best: Candidate,
    generation: usize,
    movement: MovementEngine,
    strategy: Strategy,
    tracker: StagnationTracker,
    stats: RunStats,
    report_interval: usize,
    next_report: usize,
    started: Instant,
    span: Span,
}

impl<O, P> FireflyRun<O, P>
where
    O: FitnessOracle,
    P: ProgressObserver,
{
    /// Validate inputs and initialize the oracle
    ///
    /// The oracle's `init` is called exactly once, here; a failure aborts
    /// the run before any evaluation.
    pub fn new(
        config: FireflyConfig,
        mut oracle: O,
        dimension: usize,
        function_id: usize,
        algorithm_name: &str,
        observer: P,
    ) -> FireflyResult<Self> {
        config.validate()?;
        if dimension == 0 {
            return Err(FireflyError::Configuration(
                "dimension must be positive".to_string(),
            ));
        }
        oracle.init(algorithm_name, function_id, dimension)?;

        let ctx = match config.seed {
            Some(seed) => RunContext::seeded(seed, config.max_fes),
            None => RunContext::from_entropy(config.max_fes),
        };
        let span = info_span!(
            "firefly_run",
            algorithm = algorithm_name,
            function_id,
            dimension,
            mode = %config.mode
        );

        Ok(Self {
            bounds: config.bounds()?,
            movement: MovementEngine::from_config(&config)?,
            strategy: Strategy::from_config(&config)?,
            report_interval: config.effective_report_interval(),
            next_report: config.effective_report_interval(),
            config,
            oracle,
            observer,
            ctx,
            dimension,
            phase: RunPhase::Initializing,
            swarm: Swarm::default(),
            best: Candidate::new(vec![0.0; dimension]),
            generation: 0,
            tracker: StagnationTracker::new(),
            stats: RunStats::new(),
            started: Instant::now(),
            span,
        })
    }

    /// Current phase
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Generations completed
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Oracle evaluations so far
    pub fn evaluations(&self) -> usize {
        self.ctx.evaluations()
    }

    /// Global best found so far
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    /// Current swarm
    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// The run configuration
    pub fn config(&self) -> &FireflyConfig {
        &self.config
    }

    /// Advance one phase transition, or one generation while running
    pub fn step(&mut self) -> RunPhase {
        let span = self.span.clone();
        let _entered = span.enter();

        match self.phase {
            RunPhase::Initializing => {
                self.swarm = Swarm::random(
                    self.config.num_fireflies,
                    self.dimension,
                    &self.bounds,
                    self.ctx.rng(),
                );
                self.transition(RunPhase::EvaluatingInitial);
            }
            RunPhase::EvaluatingInitial => {
                self.ctx.reset_budget();
                for candidate in self.swarm.iter_mut() {
                    if !self.ctx.evaluate(&mut self.oracle, candidate) {
                        break;
                    }
                }
                self.rescan_best();
                if let Strategy::Elitist(elitist) = &mut self.strategy {
                    elitist.record(&self.swarm);
                }
                self.report_if_due();
                self.continue_or_terminate();
            }
            RunPhase::Running => {
                self.run_generation();
                self.report_if_due();
                self.continue_or_terminate();
            }
            RunPhase::Terminated => {}
        }
        self.phase
    }

    /// Step until the budget is spent and return the result
    pub fn run_to_end(mut self) -> RunResult {
        while self.step() != RunPhase::Terminated {}
        self.result()
    }

    /// Result of the run so far
    pub fn result(&self) -> RunResult {
        RunResult {
            best_position: self.best.position.clone(),
            best_fitness: self.best.fitness,
            error: self.oracle.error(self.best.fitness),
            evaluations: self.ctx.evaluations(),
            generations: self.generation,
            stats: self.stats.clone(),
        }
    }

    fn run_generation(&mut self) {
        let moved = self
            .movement
            .sweep(&mut self.swarm, self.generation, &mut self.oracle, &mut self.ctx);
        self.rescan_best();

        match &mut self.strategy {
            Strategy::Basic => {}
            Strategy::LocalSearch(search) => {
                if search.should_run(self.generation, self.ctx.evaluations(), &self.tracker) {
                    let outcome = search.improve(&mut self.best, &mut self.oracle, &mut self.ctx);
                    self.stats.local_search_evaluations += outcome.evaluations;
                    self.tracker.observe(self.best.fitness, self.ctx.evaluations());
                }
            }
            Strategy::Elitist(elitist) => {
                if elitist.apply(&mut self.swarm, self.ctx.rng()).is_some() {
                    self.stats.reinjections += 1;
                }
            }
        }

        self.generation += 1;
        self.stats.record(GenerationStats::from_swarm(
            &self.swarm,
            self.generation,
            self.ctx.evaluations(),
            self.best.fitness,
        ));
        trace!(
            generation = self.generation,
            moved,
            evaluations = self.ctx.evaluations(),
            best_fitness = self.best.fitness,
            "generation complete"
        );
    }

    /// Copy the swarm's best into the global best on strict improvement
    fn rescan_best(&mut self) {
        if let Some(candidate) = self.swarm.best() {
            if candidate.is_better_than(&self.best) {
                self.best = candidate.clone();
            }
        }
        self.tracker.observe(self.best.fitness, self.ctx.evaluations());
    }

    fn report_if_due(&mut self) {
        let evaluations = self.ctx.evaluations();
        if evaluations >= self.next_report {
            self.observer.on_progress(&self.report());
            self.next_report = (evaluations / self.report_interval + 1) * self.report_interval;
        }
    }

    fn continue_or_terminate(&mut self) {
        if self.ctx.is_exhausted() {
            self.stats.set_runtime(self.started.elapsed());
            self.transition(RunPhase::Terminated);
            self.observer.on_finish(&self.report());
        } else if self.phase != RunPhase::Running {
            self.transition(RunPhase::Running);
        }
    }

    fn transition(&mut self, next: RunPhase) {
        debug!(from = ?self.phase, to = ?next, evaluations = self.ctx.evaluations(), "phase transition");
        self.phase = next;
    }

    fn report(&self) -> ProgressReport {
        ProgressReport {
            evaluations: self.ctx.evaluations(),
            generation: self.generation,
            best_fitness: self.best.fitness,
        }
    }
}

/// Validated configuration that can launch runs
#[derive(Clone, Debug)]
pub struct FireflyOptimizer {
    config: FireflyConfig,
}

impl FireflyOptimizer {
    /// Create an optimizer, rejecting invalid configurations
    pub fn new(config: FireflyConfig) -> FireflyResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration runs are launched with
    pub fn config(&self) -> &FireflyConfig {
        &self.config
    }

    /// Prepare a stepwise run
    pub fn start<O, P>(
        &self,
        oracle: O,
        dimension: usize,
        function_id: usize,
        algorithm_name: &str,
        observer: P,
    ) -> FireflyResult<FireflyRun<O, P>>
    where
        O: FitnessOracle,
        P: ProgressObserver,
    {
        FireflyRun::new(
            self.config.clone(),
            oracle,
            dimension,
            function_id,
            algorithm_name,
            observer,
        )
    }

    /// Run to completion, reporting progress through `tracing`
    pub fn run<O: FitnessOracle>(
        &self,
        oracle: O,
        dimension: usize,
        function_id: usize,
        algorithm_name: &str,
    ) -> FireflyResult<RunResult> {
        self.run_with_observer(oracle, dimension, function_id, algorithm_name, TracingObserver)
    }

    /// Run to completion with a custom progress observer
    pub fn run_with_observer<O, P>(
        &self,
        oracle: O,
        dimension: usize,
        function_id: usize,
        algorithm_name: &str,
        observer: P,
    ) -> FireflyResult<RunResult>
    where
        O: FitnessOracle,
        P: ProgressObserver,
    {
        let run = self.start(oracle, dimension, function_id, algorithm_name, observer)?;
        Ok(run.run_to_end())
    }
}

/// Run one optimization and return the best fitness found
pub fn run<O: FitnessOracle>(
    oracle: O,
    dimension: usize,
    function_id: usize,
    config: &FireflyConfig,
    algorithm_name: &str,
) -> FireflyResult<f64> {
    let result = FireflyOptimizer::new(config.clone())?.run(
        oracle,
        dimension,
        function_id,
        algorithm_name,
    )?;
    Ok(result.best_fitness)
}
