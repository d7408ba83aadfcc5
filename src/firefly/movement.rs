//! Movement engine
//!
//! One sweep moves every firefly toward all strictly brighter (lower fitness)
//! fireflies, adds cooled uniform noise, clamps to the bounds and re-evaluates.
//! Each update reads only the swarm as it was at the start of the sweep: new
//! positions are written into a separate buffer that replaces the swarm at the
//! end, so the visiting order never changes the result.

use rand::Rng;

use crate::budget::RunContext;
use crate::error::FireflyResult;
use crate::firefly::config::{DecayKernel, FireflyConfig};
use crate::hyperparameter::schedules::{GeometricCooling, ParameterSchedule};
use crate::oracle::traits::FitnessOracle;
use crate::space::bounds::Bounds;
use crate::swarm::candidate::Candidate;
use crate::swarm::swarm::Swarm;

/// Attraction-based position update
#[derive(Clone, Debug)]
pub struct MovementEngine {
    beta0: f64,
    gamma: f64,
    kernel: DecayKernel,
    bounds: Bounds,
    alpha: GeometricCooling,
}

impl MovementEngine {
    /// Build the engine from a configuration
    pub fn from_config(config: &FireflyConfig) -> FireflyResult<Self> {
        Ok(Self {
            beta0: config.beta0,
            gamma: config.gamma,
            kernel: config.kernel,
            bounds: config.bounds()?,
            alpha: config.alpha_schedule(),
        })
    }

    /// Noise scale at `generation`
    pub fn alpha_at(&self, generation: usize) -> f64 {
        self.alpha.value_at(generation)
    }

    /// Summed attraction of `current` toward every strictly better member of `swarm`
    pub fn attraction(&self, current: &Candidate, swarm: &Swarm) -> Vec<f64> {
        let mut step = vec![0.0; current.dimension()];
        for other in swarm.iter().filter(|other| other.is_better_than(current)) {
            let r2 = current.squared_distance(other);
            let beta = self.kernel.attractiveness(self.beta0, self.gamma, r2);
            for (s, (xi, xj)) in step
                .iter_mut()
                .zip(current.position.iter().zip(other.position.iter()))
            {
                *s += beta * (xj - xi);
            }
        }
        step
    }

    /// New position of `current`: attraction plus noise, clamped
    pub fn next_position<R: Rng>(
        &self,
        current: &Candidate,
        swarm: &Swarm,
        alpha_t: f64,
        rng: &mut R,
    ) -> Vec<f64> {
        let width = self.bounds.width();
        self.attraction(current, swarm)
            .into_iter()
            .zip(current.position.iter())
            .map(|(step, x)| {
                let noise = alpha_t * (rng.gen::<f64>() - 0.5) * width;
                self.bounds.clamp(x + step + noise)
            })
            .collect()
    }

    /// Move and re-evaluate the whole swarm once
    ///
    /// Stops as soon as the budget is spent; fireflies not reached keep their
    /// position and fitness. Returns the number of fireflies moved.
    pub fn sweep<O, R>(
        &self,
        swarm: &mut Swarm,
        generation: usize,
        oracle: &mut O,
        ctx: &mut RunContext<R>,
    ) -> usize
    where
        O: FitnessOracle + ?Sized,
        R: Rng,
    {
        let alpha_t = self.alpha_at(generation);
        let mut next = swarm.clone();
        let mut moved = 0;

        for i in 0..swarm.len() {
            if ctx.is_exhausted() {
                break;
            }
            next[i].position = self.next_position(&swarm[i], swarm, alpha_t, ctx.rng());
            ctx.evaluate(oracle, &mut next[i]);
            moved += 1;
        }

        *swarm = next;
        moved
    }
}
