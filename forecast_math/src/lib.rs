//! # Forecast Math
//!
//! Numerical building blocks for daily demand forecasting.
//! This crate provides the statistics behind the forecasting engine:
//! descriptive moments, ordinary least squares with standard errors,
//! Yule-Walker autoregression and the distributions used for
//! confidence intervals and unit-root p-values.

use thiserror::Error;

pub mod autoregressive;
pub mod descriptive;
pub mod distributions;
pub mod regression;

/// Errors that can occur in numerical calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Singular matrix: {0}")]
    SingularMatrix(String),
}

/// Result type for numerical operations
pub type Result<T> = std::result::Result<T, MathError>;

/// Reject slices containing NaN or infinite values
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> Result<()> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "{} contains NaN or infinite values",
            what
        )));
    }
    Ok(())
}
