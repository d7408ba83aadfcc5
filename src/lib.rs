//! # firefly-evo
//!
//! A budgeted firefly metaheuristic for continuous minimization.
//!
//! A swarm of candidate solutions moves through a box-bounded search space;
//! each firefly is attracted to every brighter (lower fitness) one, with
//! attraction decaying with distance, plus a cooled random walk. An
//! intensification mode refines the search on top of the plain swarm:
//!
//! - **Basic**: movement only
//! - **Local search**: coordinate descent or an adaptive-step search on the
//!   global best
//! - **Elitist**: an archive of the best fireflies seen, reinjected into the
//!   worst slot every generation
//!
//! Every oracle call is counted against `max_fes`; the run stops exactly
//! when the budget is spent.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use firefly_evo::prelude::*;
//!
//! let config = FireflyConfig::builder()
//!     .num_fireflies(20)
//!     .bounds(-10.0, 10.0)
//!     .max_fes(2000)
//!     .seed(42)
//!     .build()?;
//!
//! let sphere = FnOracle::new(|x: &[f64]| x.iter().map(|v| v * v).sum());
//! let result = FireflyOptimizer::new(config)?.run(sphere, 2, 1, "firefly")?;
//! println!("best {:e} after {} evaluations", result.best_fitness, result.evaluations);
//! ```

pub mod budget;
pub mod diagnostics;
pub mod error;
pub mod firefly;
pub mod hyperparameter;
pub mod oracle;
pub mod space;
pub mod swarm;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::budget::{EvaluationBudget, RunContext};
    pub use crate::diagnostics::prelude::*;
    pub use crate::error::*;
    pub use crate::firefly::prelude::*;
    pub use crate::hyperparameter::prelude::*;
    pub use crate::oracle::prelude::*;
    pub use crate::space::prelude::*;
    pub use crate::swarm::prelude::*;
}
