//! Autoregressive estimation and integration helpers
//!
//! Contains the pieces an ARIMA(p, d, 0) model is assembled from:
//! - Differencing and its inverse
//! - Yule-Walker estimation via the Levinson-Durbin recursion
//! - Psi (MA-infinity) weights for forecast error variance

use crate::descriptive::autocovariances;
use crate::{ensure_finite, MathError, Result};

/// Apply `order` rounds of first differencing
pub fn difference(values: &[f64], order: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo `order` rounds of differencing for values forecast past the end of
/// `history`.
///
/// `forecasts` are on the `order`-times differenced scale; the result is on
/// the scale of `history`.
pub fn integrate(forecasts: &[f64], history: &[f64], order: usize) -> Result<Vec<f64>> {
    if order > 0 && history.len() < order {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} observations to undo differencing of order {}",
            order, order
        )));
    }

    let mut result = forecasts.to_vec();
    for level in (0..order).rev() {
        let base = difference(history, level);
        let mut last = *base.last().ok_or_else(|| {
            MathError::InsufficientData("No history left to integrate from".to_string())
        })?;

        for value in result.iter_mut() {
            last += *value;
            *value = last;
        }
    }

    Ok(result)
}

/// Output of the Levinson-Durbin recursion
#[derive(Debug, Clone, PartialEq)]
pub struct YuleWalker {
    /// AR coefficients `phi_1..phi_p`
    pub coefficients: Vec<f64>,
    /// Innovation variance implied by the autocovariances
    pub innovation_variance: f64,
}

/// Solve the Yule-Walker equations for autocovariances `gamma_0..gamma_p`.
///
/// A zero `gamma_0` (constant series) yields all-zero coefficients. If the
/// prediction error variance collapses before order `p` is reached, the
/// remaining coefficients stay at zero.
pub fn levinson_durbin(gammas: &[f64]) -> Result<YuleWalker> {
    ensure_finite(gammas, "Autocovariances")?;

    let order = gammas.len().saturating_sub(1);
    let gamma0 = gammas.first().copied().ok_or_else(|| {
        MathError::InsufficientData("Need at least the lag-0 autocovariance".to_string())
    })?;

    if gamma0 < 0.0 {
        return Err(MathError::InvalidInput(
            "Lag-0 autocovariance must not be negative".to_string(),
        ));
    }

    let mut phi = vec![0.0; order];
    if gamma0 <= f64::EPSILON {
        return Ok(YuleWalker {
            coefficients: phi,
            innovation_variance: 0.0,
        });
    }

    let tolerance = gamma0 * 1e-12;
    let mut error = gamma0;

    for k in 0..order {
        if error <= tolerance {
            break;
        }

        let acc = gammas[k + 1] - (0..k).map(|j| phi[j] * gammas[k - j]).sum::<f64>();
        let reflection = acc / error;

        if !reflection.is_finite() || reflection.abs() > 1.0 + 1e-9 {
            return Err(MathError::CalculationError(format!(
                "Reflection coefficient {} at lag {} is outside [-1, 1]",
                reflection,
                k + 1
            )));
        }

        let previous = phi.clone();
        phi[k] = reflection;
        for j in 0..k {
            phi[j] = previous[j] - reflection * previous[k - 1 - j];
        }

        error *= 1.0 - reflection * reflection;
    }

    Ok(YuleWalker {
        coefficients: phi,
        innovation_variance: error.max(0.0),
    })
}

/// Estimate AR(`order`) coefficients from a series with Yule-Walker
pub fn yule_walker(values: &[f64], order: usize, demean: bool) -> Result<YuleWalker> {
    ensure_finite(values, "Series")?;
    let gammas = autocovariances(values, order, demean)?;
    levinson_durbin(&gammas)
}

/// Psi weights `psi_0..psi_{horizon-1}` of an AR process integrated
/// `integration` times.
///
/// The h-step forecast error variance is `sigma^2 * sum(psi_j^2, j < h)`.
pub fn psi_weights(ar: &[f64], integration: usize, horizon: usize) -> Vec<f64> {
    let mut psi = Vec::with_capacity(horizon);
    for j in 0..horizon {
        if j == 0 {
            psi.push(1.0);
            continue;
        }
        let value: f64 = ar
            .iter()
            .take(j)
            .enumerate()
            .map(|(i, phi)| phi * psi[j - i - 1])
            .sum();
        psi.push(value);
    }

    for _ in 0..integration {
        let mut running = 0.0;
        for value in psi.iter_mut() {
            running += *value;
            *value = running;
        }
    }

    psi
}
