//! Benchmark fitness functions
//!
//! A small numbered suite of standard continuous benchmarks. Each function
//! is shifted by a bias of `100 * function_id`, so the known optimum of
//! function `k` is `100 * k` and `error(f) = f - 100 * k`.

use std::f64::consts::{E, PI};

use crate::error::OracleError;
use crate::oracle::traits::FitnessOracle;

/// Number of functions in [`BenchmarkSuite`] (ids `1..=FUNCTION_COUNT`)
pub const FUNCTION_COUNT: usize = 8;

/// Trait for benchmark functions
pub trait BenchmarkFunction: Send + Sync {
    /// Name of the benchmark function
    fn name(&self) -> &'static str;

    /// Smallest dimension the function is defined for
    fn min_dimension(&self) -> usize {
        1
    }

    /// Unbiased value; the global minimum is 0
    fn evaluate_raw(&self, x: &[f64]) -> f64;
}

/// Sphere function: f(x) = Σxᵢ²
///
/// Unimodal, convex, separable. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Sphere;

impl BenchmarkFunction for Sphere {
    fn name(&self) -> &'static str {
        "Sphere"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

/// High-conditioned ellipsoid: f(x) = Σ 10^(6·i/(n-1)) xᵢ²
///
/// Unimodal, separable, conditioning 10⁶. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Ellipsoid;

impl BenchmarkFunction for Ellipsoid {
    fn name(&self) -> &'static str {
        "Ellipsoid"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let n = x.len();
        if n == 1 {
            return x[0] * x[0];
        }
        x.iter()
            .enumerate()
            .map(|(i, xi)| 10f64.powf(6.0 * i as f64 / (n - 1) as f64) * xi * xi)
            .sum()
    }
}

/// Rosenbrock function: f(x) = Σ[100(xᵢ₊₁-xᵢ²)² + (1-xᵢ)²]
///
/// Valley structure, non-separable. Optimum at (1,1,...,1).
#[derive(Clone, Debug, Default)]
pub struct Rosenbrock;

impl BenchmarkFunction for Rosenbrock {
    fn name(&self) -> &'static str {
        "Rosenbrock"
    }

    fn min_dimension(&self) -> usize {
        2
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        x.windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum()
    }
}

/// Rastrigin function: f(x) = 10n + Σ(xᵢ² - 10cos(2πxᵢ))
///
/// Highly multimodal with many local minima. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Rastrigin;

impl BenchmarkFunction for Rastrigin {
    fn name(&self) -> &'static str {
        "Rastrigin"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let a = 10.0;
        a * x.len() as f64
            + x.iter()
                .map(|xi| xi * xi - a * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }
}

/// Ackley function
///
/// Nearly flat outer region with a deep funnel at the origin.
#[derive(Clone, Debug)]
pub struct Ackley {
    a: f64,
    b: f64,
    c: f64,
}

impl Default for Ackley {
    fn default() -> Self {
        Self {
            a: 20.0,
            b: 0.2,
            c: 2.0 * PI,
        }
    }
}

impl BenchmarkFunction for Ackley {
    fn name(&self) -> &'static str {
        "Ackley"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let n = x.len() as f64;
        let sum_sq = x.iter().map(|xi| xi * xi).sum::<f64>();
        let sum_cos = x.iter().map(|xi| (self.c * xi).cos()).sum::<f64>();

        -self.a * (-self.b * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + self.a + E
    }
}

/// Griewank function
///
/// Many regularly distributed local minima. Optimum at origin.
#[derive(Clone, Debug, Default)]
pub struct Griewank;

impl BenchmarkFunction for Griewank {
    fn name(&self) -> &'static str {
        "Griewank"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum::<f64>() / 4000.0;
        let prod_cos: f64 = x
            .iter()
            .enumerate()
            .map(|(i, xi)| (xi / ((i + 1) as f64).sqrt()).cos())
            .product();
        sum_sq - prod_cos + 1.0
    }
}

/// Schwefel 2.22: f(x) = Σ|xᵢ| + Π|xᵢ|
#[derive(Clone, Debug, Default)]
pub struct Schwefel222;

impl BenchmarkFunction for Schwefel222 {
    fn name(&self) -> &'static str {
        "Schwefel 2.22"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let sum: f64 = x.iter().map(|xi| xi.abs()).sum();
        let prod: f64 = x.iter().map(|xi| xi.abs()).product();
        sum + prod
    }
}

/// Zakharov function: f(x) = Σxᵢ² + (Σ0.5·i·xᵢ)² + (Σ0.5·i·xᵢ)⁴
#[derive(Clone, Debug, Default)]
pub struct Zakharov;

impl BenchmarkFunction for Zakharov {
    fn name(&self) -> &'static str {
        "Zakharov"
    }

    fn evaluate_raw(&self, x: &[f64]) -> f64 {
        let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
        let weighted: f64 = x
            .iter()
            .enumerate()
            .map(|(i, xi)| 0.5 * (i + 1) as f64 * xi)
            .sum();
        sum_sq + weighted.powi(2) + weighted.powi(4)
    }
}

/// Look up a benchmark by its suite id
pub fn function_for(function_id: usize) -> Option<Box<dyn BenchmarkFunction>> {
    let function: Box<dyn BenchmarkFunction> = match function_id {
        1 => Box::new(Sphere),
        2 => Box::new(Ellipsoid),
        3 => Box::new(Rosenbrock),
        4 => Box::new(Rastrigin),
        5 => Box::new(Ackley::default()),
        6 => Box::new(Griewank),
        7 => Box::new(Schwefel222),
        8 => Box::new(Zakharov),
        _ => return None,
    };
    Some(function)
}

/// Known optimum of a suite function
pub fn optimum_for(function_id: usize) -> f64 {
    100.0 * function_id as f64
}

/// Numbered benchmark suite usable as a [`FitnessOracle`]
///
/// Calling [`FitnessOracle::fitness`] before a successful `init` is a
/// contract violation and panics.
#[derive(Default)]
pub struct BenchmarkSuite {
    function: Option<Box<dyn BenchmarkFunction>>,
    function_id: usize,
    dimension: usize,
    calls: usize,
}

impl BenchmarkSuite {
    /// Create an uninitialized suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the active function, if initialized
    pub fn function_name(&self) -> Option<&'static str> {
        self.function.as_ref().map(|f| f.name())
    }

    /// Active function id (0 before `init`)
    pub fn function_id(&self) -> usize {
        self.function_id
    }

    /// Active dimension (0 before `init`)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of `fitness` calls since the last `init`
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl FitnessOracle for BenchmarkSuite {
    fn init(
        &mut self,
        _algorithm_name: &str,
        function_id: usize,
        dimension: usize,
    ) -> Result<(), OracleError> {
        let function = function_for(function_id).ok_or(OracleError::UnknownFunction(function_id))?;
        if dimension < function.min_dimension() {
            return Err(OracleError::UnsupportedDimension {
                function_id,
                dimension,
            });
        }
        self.function = Some(function);
        self.function_id = function_id;
        self.dimension = dimension;
        self.calls = 0;
        Ok(())
    }

    fn fitness(&mut self, position: &[f64]) -> f64 {
        let function = self
            .function
            .as_ref()
            .expect("BenchmarkSuite::fitness called before init");
        debug_assert_eq!(position.len(), self.dimension);
        self.calls += 1;
        function.evaluate_raw(position) + optimum_for(self.function_id)
    }

    fn error(&self, best_fitness: f64) -> f64 {
        best_fitness - optimum_for(self.function_id)
    }
}
