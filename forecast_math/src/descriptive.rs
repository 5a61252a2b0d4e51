//! Descriptive statistics over plain slices

use crate::{MathError, Result};

/// Arithmetic mean of a non-empty slice
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(
            "Cannot compute the mean of an empty series".to_string(),
        ));
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Whether every value equals the first one within `tolerance`
pub fn is_constant(values: &[f64], tolerance: f64) -> bool {
    match values.first() {
        Some(first) => values.iter().all(|v| (v - first).abs() <= tolerance),
        None => true,
    }
}

/// Sample autocovariances for lags `0..=max_lag`.
///
/// Each lag is normalised by `n` rather than `n - k`, which keeps the
/// resulting Toeplitz matrix positive semi-definite. When `demean` is false
/// the series is taken to have zero mean.
pub fn autocovariances(values: &[f64], max_lag: usize, demean: bool) -> Result<Vec<f64>> {
    let n = values.len();
    if n <= max_lag {
        return Err(MathError::InsufficientData(format!(
            "Need more than {} observations for lag {} autocovariances, got {}",
            max_lag, max_lag, n
        )));
    }

    let center = if demean { mean(values)? } else { 0.0 };
    let centered: Vec<f64> = values.iter().map(|v| v - center).collect();

    let gammas = (0..=max_lag)
        .map(|k| {
            let sum: f64 = (k..n).map(|i| centered[i] * centered[i - k]).sum();
            sum / n as f64
        })
        .collect();

    Ok(gammas)
}
