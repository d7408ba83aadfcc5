//! Firefly algorithm configuration
//!
//! All run parameters live in [`FireflyConfig`]; nothing is read from globals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FireflyError, FireflyResult};
use crate::hyperparameter::schedules::GeometricCooling;
use crate::space::bounds::Bounds;
use crate::swarm::archive::ArchiveDraw;

/// Intensification strategy applied after each movement sweep
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Plain swarm movement
    #[default]
    Basic,
    /// Memetic local search on the global best
    LocalSearch,
    /// Elitist archive reinjection
    Elitist,
}

impl SearchMode {
    /// Every mode, in sweep order
    pub const ALL: [SearchMode; 3] = [SearchMode::Basic, SearchMode::LocalSearch, SearchMode::Elitist];

    /// Short lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Basic => "basic",
            SearchMode::LocalSearch => "local_search",
            SearchMode::Elitist => "elitist",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Distance decay of attractiveness
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecayKernel {
    /// β = β₀ · exp(-γ r²)
    #[default]
    Gaussian,
    /// β = β₀ · exp(-γ r)
    Exponential,
}

impl DecayKernel {
    /// Attractiveness at squared distance `r2`
    pub fn attractiveness(&self, beta0: f64, gamma: f64, r2: f64) -> f64 {
        match self {
            DecayKernel::Gaussian => beta0 * (-gamma * r2).exp(),
            DecayKernel::Exponential => beta0 * (-gamma * r2.sqrt()).exp(),
        }
    }
}

/// Parameters of the adaptive-step (Solis-Wets style) local search
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveStepConfig {
    /// Initial per-coordinate step as a fraction of the domain width
    pub initial_step_fraction: f64,
    /// Step multiplier after an accepted probe
    pub expansion: f64,
    /// Step multiplier after a rejected probe
    pub contraction: f64,
    /// Search stops once every step is below this
    pub min_step: f64,
    /// Trigger every `period` generations
    pub period: usize,
    /// Share of `max_fes` local search may spend over the whole run
    pub budget_fraction: f64,
}

impl Default for AdaptiveStepConfig {
    fn default() -> Self {
        Self {
            initial_step_fraction: 0.1,
            expansion: 1.2,
            contraction: 0.5,
            min_step: 1e-6,
            period: 5,
            budget_fraction: 0.2,
        }
    }
}

/// Local search variant used in [`SearchMode::LocalSearch`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum LocalSearchVariant {
    /// Up to `sweeps` passes of +1%-of-width coordinate probes
    CoordinateDescent {
        /// Maximum number of sweeps over all coordinates
        sweeps: usize,
    },
    /// Gaussian probes with per-coordinate step adaptation
    AdaptiveStep(AdaptiveStepConfig),
}

impl Default for LocalSearchVariant {
    fn default() -> Self {
        LocalSearchVariant::AdaptiveStep(AdaptiveStepConfig::default())
    }
}

/// Configuration for the firefly optimizer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireflyConfig {
    /// Swarm size
    pub num_fireflies: usize,
    /// Randomness scale
    pub alpha: f64,
    /// Attractiveness at distance 0
    pub beta0: f64,
    /// Light absorption coefficient
    pub gamma: f64,
    /// Lower bound for every coordinate
    pub lower_bound: f64,
    /// Upper bound for every coordinate
    pub upper_bound: f64,
    /// Evaluation budget
    pub max_fes: usize,
    /// Intensification strategy
    pub mode: SearchMode,
    /// Per-generation cooling factor of `alpha`
    pub alpha_decay: f64,
    /// Attractiveness kernel
    pub kernel: DecayKernel,
    /// Local search variant (local-search mode only)
    pub local_search: LocalSearchVariant,
    /// Archive capacity (elitist mode only)
    pub archive_size: usize,
    /// Archive reinjection policy (elitist mode only)
    pub archive_draw: ArchiveDraw,
    /// Progress cadence in evaluations; `None` means a tenth of the budget
    pub report_interval: Option<usize>,
    /// Random seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for FireflyConfig {
    fn default() -> Self {
        Self {
            num_fireflies: 40,
            alpha: 0.5,
            beta0: 1.0,
            gamma: 0.1,
            lower_bound: -100.0,
            upper_bound: 100.0,
            max_fes: 100_000,
            mode: SearchMode::Basic,
            alpha_decay: 0.97,
            kernel: DecayKernel::Gaussian,
            local_search: LocalSearchVariant::default(),
            archive_size: 5,
            archive_draw: ArchiveDraw::Uniform,
            report_interval: None,
            seed: None,
        }
    }
}

impl FireflyConfig {
    /// Defaults with the benchmark budget of `10_000 * dimension` evaluations
    pub fn for_dimension(dimension: usize) -> Self {
        Self {
            max_fes: 10_000 * dimension,
            ..Self::default()
        }
    }

    /// Start a builder from the defaults
    pub fn builder() -> FireflyConfigBuilder {
        FireflyConfigBuilder::new()
    }

    /// Search-space bounds
    pub fn bounds(&self) -> FireflyResult<Bounds> {
        Bounds::new(self.lower_bound, self.upper_bound)
    }

    /// Cooling schedule of the movement noise
    pub fn alpha_schedule(&self) -> GeometricCooling {
        GeometricCooling::new(self.alpha, self.alpha_decay)
    }

    /// Progress cadence in evaluations
    pub fn effective_report_interval(&self) -> usize {
        self.report_interval.unwrap_or((self.max_fes / 10).max(1))
    }

    /// Reject configurations the optimizer cannot run with
    pub fn validate(&self) -> FireflyResult<()> {
        if self.num_fireflies == 0 {
            return Err(config_error("num_fireflies must be positive"));
        }
        if self.max_fes == 0 {
            return Err(config_error("max_fes must be positive"));
        }
        self.bounds()?;
        for (name, value) in [("alpha", self.alpha), ("beta0", self.beta0), ("gamma", self.gamma)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FireflyError::Configuration(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }
        if !(self.alpha_decay > 0.0 && self.alpha_decay <= 1.0) {
            return Err(FireflyError::Configuration(format!(
                "alpha_decay must lie in (0, 1], got {}",
                self.alpha_decay
            )));
        }
        if self.report_interval == Some(0) {
            return Err(config_error("report_interval must be positive"));
        }
        match self.mode {
            SearchMode::Elitist if self.archive_size == 0 => {
                return Err(config_error("archive_size must be positive in elitist mode"));
            }
            SearchMode::LocalSearch => self.validate_local_search()?,
            _ => {}
        }
        Ok(())
    }

    fn validate_local_search(&self) -> FireflyResult<()> {
        match &self.local_search {
            LocalSearchVariant::CoordinateDescent { sweeps } if *sweeps == 0 => {
                Err(config_error("coordinate descent needs at least one sweep"))
            }
            LocalSearchVariant::CoordinateDescent { .. } => Ok(()),
            LocalSearchVariant::AdaptiveStep(cfg) => {
                if cfg.period == 0 {
                    return Err(config_error("adaptive step period must be positive"));
                }
                if !(cfg.budget_fraction > 0.0 && cfg.budget_fraction <= 1.0) {
                    return Err(config_error("adaptive step budget_fraction must lie in (0, 1]"));
                }
                if !(cfg.initial_step_fraction > 0.0 && cfg.min_step > 0.0) {
                    return Err(config_error("adaptive step sizes must be positive"));
                }
                if !(cfg.expansion >= 1.0 && cfg.contraction > 0.0 && cfg.contraction < 1.0) {
                    return Err(config_error(
                        "adaptive step needs expansion >= 1 and contraction in (0, 1)",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> FireflyResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> FireflyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn config_error(message: &str) -> FireflyError {
    FireflyError::Configuration(message.to_string())
}

/// Builder for [`FireflyConfig`]
#[derive(Clone, Debug, Default)]
pub struct FireflyConfigBuilder {
    config: FireflyConfig,
}

impl FireflyConfigBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the swarm size
    pub fn num_fireflies(mut self, n: usize) -> Self {
        self.config.num_fireflies = n;
        self
    }

    /// Set the randomness scale
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set the base attractiveness
    pub fn beta0(mut self, beta0: f64) -> Self {
        self.config.beta0 = beta0;
        self
    }

    /// Set the light absorption coefficient
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.config.gamma = gamma;
        self
    }

    /// Set the search bounds for every coordinate
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.config.lower_bound = lower;
        self.config.upper_bound = upper;
        self
    }

    /// Set the evaluation budget
    pub fn max_fes(mut self, max_fes: usize) -> Self {
        self.config.max_fes = max_fes;
        self
    }

    /// Set the intensification mode
    pub fn mode(mut self, mode: SearchMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the cooling factor of `alpha`
    pub fn alpha_decay(mut self, decay: f64) -> Self {
        self.config.alpha_decay = decay;
        self
    }

    /// Set the attractiveness kernel
    pub fn kernel(mut self, kernel: DecayKernel) -> Self {
        self.config.kernel = kernel;
        self
    }

    /// Set the local search variant
    pub fn local_search(mut self, variant: LocalSearchVariant) -> Self {
        self.config.local_search = variant;
        self
    }

    /// Use coordinate descent with `sweeps` passes
    pub fn coordinate_descent(self, sweeps: usize) -> Self {
        self.local_search(LocalSearchVariant::CoordinateDescent { sweeps })
    }

    /// Use the adaptive-step local search with default parameters
    pub fn adaptive_step(self) -> Self {
        self.local_search(LocalSearchVariant::AdaptiveStep(AdaptiveStepConfig::default()))
    }

    /// Set the archive capacity
    pub fn archive_size(mut self, size: usize) -> Self {
        self.config.archive_size = size;
        self
    }

    /// Set the archive reinjection policy
    pub fn archive_draw(mut self, draw: ArchiveDraw) -> Self {
        self.config.archive_draw = draw;
        self
    }

    /// Set the progress cadence in evaluations
    pub fn report_interval(mut self, interval: usize) -> Self {
        self.config.report_interval = Some(interval);
        self
    }

    /// Set the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> FireflyResult<FireflyConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = FireflyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_fireflies, 40);
        assert_eq!(config.mode, SearchMode::Basic);
        assert!(matches!(config.local_search, LocalSearchVariant::AdaptiveStep(_)));
        assert_eq!(config.effective_report_interval(), 10_000);
    }

    #[test]
    fn test_for_dimension_budget() {
        assert_eq!(FireflyConfig::for_dimension(30).max_fes, 300_000);
    }

    #[test]
    fn test_builder() {
        let config = FireflyConfig::builder()
            .num_fireflies(20)
            .bounds(-10.0, 10.0)
            .max_fes(2000)
            .mode(SearchMode::Elitist)
            .archive_size(3)
            .seed(9)
            .build()
            .unwrap();

        assert_eq!(config.num_fireflies, 20);
        assert_eq!(config.bounds().unwrap().width(), 20.0);
        assert_eq!(config.archive_size, 3);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_rejects_non_positive_counts() {
        assert!(FireflyConfig::builder().num_fireflies(0).build().is_err());
        let err = FireflyConfig::builder().max_fes(0).build().unwrap_err();
        assert!(err.to_string().contains("max_fes"));
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(FireflyConfig::builder().bounds(5.0, 5.0).build().is_err());
        assert!(FireflyConfig::builder().bounds(10.0, -10.0).build().is_err());
    }

    #[test]
    fn test_rejects_bad_coefficients() {
        assert!(FireflyConfig::builder().alpha(-0.1).build().is_err());
        assert!(FireflyConfig::builder().gamma(f64::NAN).build().is_err());
        assert!(FireflyConfig::builder().alpha_decay(0.0).build().is_err());
        assert!(FireflyConfig::builder().alpha_decay(1.5).build().is_err());
        assert!(FireflyConfig::builder().report_interval(0).build().is_err());
    }

    #[test]
    fn test_mode_specific_validation() {
        assert!(FireflyConfig::builder()
            .mode(SearchMode::Elitist)
            .archive_size(0)
            .build()
            .is_err());
        // Archive size is irrelevant outside elitist mode
        assert!(FireflyConfig::builder().archive_size(0).build().is_ok());

        assert!(FireflyConfig::builder()
            .mode(SearchMode::LocalSearch)
            .coordinate_descent(0)
            .build()
            .is_err());

        let mut adaptive = AdaptiveStepConfig::default();
        adaptive.period = 0;
        assert!(FireflyConfig::builder()
            .mode(SearchMode::LocalSearch)
            .local_search(LocalSearchVariant::AdaptiveStep(adaptive))
            .build()
            .is_err());
    }

    #[test]
    fn test_kernels() {
        assert_relative_eq!(DecayKernel::Gaussian.attractiveness(1.0, 0.1, 4.0), (-0.4f64).exp());
        assert_relative_eq!(
            DecayKernel::Exponential.attractiveness(1.0, 0.1, 4.0),
            (-0.2f64).exp()
        );
        assert_relative_eq!(DecayKernel::Gaussian.attractiveness(2.0, 5.0, 0.0), 2.0);
    }

    #[test]
    fn test_json_roundtrip_and_partial_documents() {
        let config = FireflyConfig::builder()
            .mode(SearchMode::LocalSearch)
            .adaptive_step()
            .seed(1)
            .build()
            .unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(FireflyConfig::from_json(&json).unwrap(), config);

        let partial = FireflyConfig::from_json(r#"{"num_fireflies": 12, "mode": "elitist"}"#).unwrap();
        assert_eq!(partial.num_fireflies, 12);
        assert_eq!(partial.mode, SearchMode::Elitist);
        assert_eq!(partial.alpha, 0.5);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        assert!(matches!(
            FireflyConfig::from_json(r#"{"max_fes": 0}"#),
            Err(FireflyError::Configuration(_))
        ));
        assert!(matches!(
            FireflyConfig::from_json("not json"),
            Err(FireflyError::Serialization(_))
        ));
    }

    #[test]
    fn test_mode_labels() {
        let labels: Vec<String> = SearchMode::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels, vec!["basic", "local_search", "elitist"]);
    }
}
