//! Distribution helpers for interval widths and unit-root p-values

use crate::{MathError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

// MacKinnon (1994) response surface for the constant-only Dickey-Fuller
// regression with a single series.
const TAU_MAX: f64 = 2.74;
const TAU_MIN: f64 = -18.83;
const TAU_STAR: f64 = -1.61;
const TAU_SMALL_P: [f64; 3] = [2.1659, 1.4412, 3.8269e-2];
const TAU_LARGE_P: [f64; 4] = [1.7339, 9.3202e-1, -1.2745e-1, -1.0368e-2];

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| MathError::CalculationError(e.to_string()))
}

/// Standard normal cumulative distribution function
pub fn normal_cdf(x: f64) -> Result<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Two-sided standard normal critical value for a confidence level.
///
/// `0.95` gives roughly `1.96`.
pub fn two_sided_z(confidence_level: f64) -> Result<f64> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Confidence level must be between 0 and 1, got {}",
            confidence_level
        )));
    }

    let alpha = 1.0 - confidence_level;
    Ok(standard_normal()?.inverse_cdf(1.0 - alpha / 2.0))
}

/// Approximate asymptotic p-value of a Dickey-Fuller t statistic
/// (regression with a constant, no trend).
pub fn mackinnon_p_value(tau: f64) -> Result<f64> {
    if tau.is_nan() {
        return Err(MathError::InvalidInput(
            "Test statistic is NaN".to_string(),
        ));
    }
    if tau > TAU_MAX {
        return Ok(1.0);
    }
    if tau < TAU_MIN {
        return Ok(0.0);
    }

    let coefficients: &[f64] = if tau <= TAU_STAR {
        &TAU_SMALL_P
    } else {
        &TAU_LARGE_P
    };

    // c0 + c1 * tau + c2 * tau^2 + ...
    let polynomial = coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, c| acc * tau + c);

    normal_cdf(polynomial)
}
