//! Error types for firefly-evo
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for fitness oracle failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OracleError {
    /// The oracle does not know the requested function id
    #[error("Unknown function id: {0}")]
    UnknownFunction(usize),

    /// The oracle cannot work in the requested dimension
    #[error("Unsupported dimension {dimension} for function {function_id}")]
    UnsupportedDimension { function_id: usize, dimension: usize },

    /// Any other oracle-side failure
    #[error("Oracle failure: {0}")]
    Failed(String),
}

/// Top-level error type for optimizer runs
#[derive(Debug, Error)]
pub enum FireflyError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The fitness oracle failed
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Configuration document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for optimizer operations
pub type FireflyResult<T> = Result<T, FireflyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_error_display() {
        let err = OracleError::UnknownFunction(42);
        assert_eq!(err.to_string(), "Unknown function id: 42");

        let err = OracleError::UnsupportedDimension {
            function_id: 3,
            dimension: 1,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported dimension 1 for function 3"
        );
    }

    #[test]
    fn test_firefly_error_from_oracle_error() {
        let err: FireflyError = OracleError::Failed("offline".to_string()).into();
        assert!(matches!(err, FireflyError::Oracle(_)));
        assert_eq!(err.to_string(), "Oracle error: Oracle failure: offline");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = FireflyError::Configuration("max_fes must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: max_fes must be positive"
        );
    }
}
