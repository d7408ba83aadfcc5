//! Box bounds of the search space
//!
//! Every coordinate of every candidate shares the same `[min, max]` interval.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{FireflyError, FireflyResult};

/// Closed interval applied to every coordinate of the search space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// Fails unless both ends are finite and `min < max`.
    pub fn new(min: f64, max: f64) -> FireflyResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FireflyError::Configuration(format!(
                "bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if min >= max {
            return Err(FireflyError::Configuration(format!(
                "lower bound ({}) must be < upper bound ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> FireflyResult<Self> {
        Self::new(-half_width, half_width)
    }

    /// Width of the interval (max - min)
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Clamp every coordinate in place
    pub fn clamp_vec(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value = self.clamp(*value);
        }
    }

    /// Check that every coordinate is within bounds
    pub fn contains_vec(&self, values: &[f64]) -> bool {
        values.iter().all(|&v| self.contains(v))
    }

    /// Draw a single value uniformly from the interval
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.min + self.width() * rng.gen::<f64>()
    }

    /// Draw `dimension` independent uniform coordinates
    pub fn sample_vec<R: Rng>(&self, dimension: usize, rng: &mut R) -> Vec<f64> {
        (0..dimension).map(|_| self.sample(rng)).collect()
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: -100.0,
            max: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bounds_new() {
        let b = Bounds::new(-5.0, 5.0).unwrap();
        assert_eq!(b.min, -5.0);
        assert_eq!(b.max, 5.0);
        assert_eq!(b.width(), 10.0);
    }

    #[test]
    fn test_bounds_rejects_inverted_and_empty() {
        assert!(Bounds::new(5.0, -5.0).is_err());
        assert!(Bounds::new(1.0, 1.0).is_err());
        let err = Bounds::new(2.0, 1.0).unwrap_err();
        assert!(err.to_string().contains("lower bound"));
    }

    #[test]
    fn test_bounds_rejects_non_finite() {
        assert!(Bounds::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Bounds::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds::symmetric(5.0).unwrap();
        assert_eq!(b.clamp(0.0), 0.0);
        assert_eq!(b.clamp(-10.0), -5.0);
        assert_eq!(b.clamp(10.0), 5.0);

        let mut values = vec![-10.0, 0.5, 10.0];
        b.clamp_vec(&mut values);
        assert_eq!(values, vec![-5.0, 0.5, 5.0]);
        assert!(b.contains_vec(&values));
    }

    #[test]
    fn test_bounds_sample_within_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = Bounds::new(-3.0, 11.0).unwrap();
        let values = b.sample_vec(1000, &mut rng);
        assert_eq!(values.len(), 1000);
        assert!(b.contains_vec(&values));
    }

    #[test]
    fn test_bounds_default_matches_benchmark_domain() {
        let b = Bounds::default();
        assert_eq!(b.min, -100.0);
        assert_eq!(b.max, 100.0);
    }
}
