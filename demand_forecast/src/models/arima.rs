//! ARIMA models for daily demand forecasting
//!
//! Only the autoregressive and integrated parts are supported (`q = 0`).
//! Coefficients come from the Yule-Walker equations on the differenced
//! series, which always yields a stationary AR polynomial.

use crate::error::{ForecastError, Result};
use crate::models::{FittedForecastModel, ForecastModel, ModelForecast};
use forecast_math::autoregressive::{difference, integrate, psi_weights, yule_walker};
use forecast_math::distributions::two_sided_z;

/// Largest AR order accepted
pub const MAX_AR_ORDER: usize = 30;

/// Largest differencing order accepted
pub const MAX_DIFFERENCING: usize = 2;

/// ARIMA model (AutoRegressive Integrated Moving Average)
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
}

/// Fitted ARIMA model
#[derive(Debug, Clone)]
pub struct FittedArima {
    /// Name of the model
    name: String,
    /// Differencing order (d)
    d: usize,
    /// Fitted AR coefficients
    ar_coefficients: Vec<f64>,
    /// Process mean on the differenced scale, zero when `d > 0`
    intercept: f64,
    /// Innovation variance
    sigma2: f64,
    /// Historical data on the original scale
    history: Vec<f64>,
    /// Historical data after differencing
    differenced: Vec<f64>,
}

impl ArimaModel {
    /// Create a new ARIMA model
    pub fn new(p: usize, d: usize, q: usize) -> Result<Self> {
        if p > MAX_AR_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "AR order must be <= {}, got {}",
                MAX_AR_ORDER, p
            )));
        }
        if d > MAX_DIFFERENCING {
            return Err(ForecastError::InvalidParameter(format!(
                "Differencing order must be <= {}, got {}",
                MAX_DIFFERENCING, d
            )));
        }
        if q != 0 {
            return Err(ForecastError::InvalidParameter(format!(
                "Only q = 0 is supported, got {}",
                q
            )));
        }

        Ok(Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
        })
    }

    /// Observations needed on the original scale
    pub fn min_observations(&self) -> usize {
        self.p + self.d + 1
    }
}

impl ForecastModel for ArimaModel {
    type Fitted = FittedArima;

    fn fit(&self, values: &[f64]) -> Result<FittedArima> {
        if values.len() < self.min_observations() {
            return Err(ForecastError::InsufficientHistory {
                required: self.min_observations(),
                actual: values.len(),
            });
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "Series contains NaN or infinite values".to_string(),
            ));
        }

        let differenced = difference(values, self.d);

        // Mean-centred AR on levels; pure AR without drift after differencing
        let demean = self.d == 0;
        let intercept = if demean {
            differenced.iter().sum::<f64>() / differenced.len() as f64
        } else {
            0.0
        };

        let yw = yule_walker(&differenced, self.p, demean)
            .map_err(|e| ForecastError::ModelFit(e.to_string()))?;
        let ar_coefficients = yw.coefficients;

        if ar_coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::ModelFit(
                "Estimated AR coefficients are not finite".to_string(),
            ));
        }

        // Innovation variance from one-step residuals with full lag history
        let residuals: Vec<f64> = (self.p..differenced.len())
            .map(|t| {
                let prediction: f64 = ar_coefficients
                    .iter()
                    .enumerate()
                    .map(|(i, phi)| phi * (differenced[t - i - 1] - intercept))
                    .sum();
                differenced[t] - intercept - prediction
            })
            .collect();

        let sigma2 = if residuals.is_empty() {
            yw.innovation_variance
        } else {
            residuals.iter().map(|r| r * r).sum::<f64>() / residuals.len() as f64
        };

        if !sigma2.is_finite() {
            return Err(ForecastError::ModelFit(
                "Innovation variance is not finite".to_string(),
            ));
        }

        Ok(FittedArima {
            name: self.name.clone(),
            d: self.d,
            ar_coefficients,
            intercept,
            sigma2,
            history: values.to_vec(),
            differenced,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedArima {
    /// Fitted AR coefficients `phi_1..phi_p`
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coefficients
    }

    /// Innovation variance estimate
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Mean of the modelled (differenced) process
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Recursive AR forecasts on the differenced scale
    fn forecast_differenced(&self, horizon: usize) -> Vec<f64> {
        let mut extended: Vec<f64> = self
            .differenced
            .iter()
            .map(|v| v - self.intercept)
            .collect();

        let mut forecasts = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let next: f64 = self
                .ar_coefficients
                .iter()
                .enumerate()
                .map(|(i, phi)| {
                    extended
                        .len()
                        .checked_sub(i + 1)
                        .map_or(0.0, |idx| phi * extended[idx])
                })
                .sum();

            extended.push(next);
            forecasts.push(next + self.intercept);
        }

        forecasts
    }
}

impl FittedForecastModel for FittedArima {
    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ModelForecast> {
        let z = two_sided_z(confidence_level)?;

        let differenced_forecast = self.forecast_differenced(horizon);
        let values = integrate(&differenced_forecast, &self.history, self.d)?;

        let psi = psi_weights(&self.ar_coefficients, self.d, horizon);
        let mut cumulative = 0.0;
        let half_widths: Vec<f64> = psi
            .iter()
            .map(|weight| {
                cumulative += weight * weight;
                z * (self.sigma2 * cumulative).sqrt()
            })
            .collect();

        if values
            .iter()
            .chain(half_widths.iter())
            .any(|v| !v.is_finite())
        {
            return Err(ForecastError::ModelFit(format!(
                "{} produced a non-finite forecast",
                self.name
            )));
        }

        let lower = values.iter().zip(&half_widths).map(|(v, w)| v - w).collect();
        let upper = values.iter().zip(&half_widths).map(|(v, w)| v + w).collect();

        ModelForecast::new(values, lower, upper)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
