//! Forecasting models for daily count series

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// Point forecast with its two-sided interval, straight from a model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    /// Forecasted values
    values: Vec<f64>,
    /// Lower interval bound per step
    lower: Vec<f64>,
    /// Upper interval bound per step
    upper: Vec<f64>,
}

impl ModelForecast {
    /// Create a forecast from aligned value and bound vectors
    pub fn new(values: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self> {
        if values.len() != lower.len() || values.len() != upper.len() {
            return Err(ForecastError::ModelFit(format!(
                "Values length ({}) doesn't match bounds ({}, {})",
                values.len(),
                lower.len(),
                upper.len()
            )));
        }

        Ok(Self {
            values,
            lower,
            upper,
        })
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lower bounds of the interval
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds of the interval
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Clip values and both bounds at zero.
    ///
    /// Clipping is monotone, so `lower <= value <= upper` survives it.
    pub fn clip_at_zero(mut self) -> Self {
        for v in self
            .values
            .iter_mut()
            .chain(self.lower.iter_mut())
            .chain(self.upper.iter_mut())
        {
            *v = v.max(0.0);
        }
        self
    }
}

/// Fitted model that can produce forecasts
pub trait FittedForecastModel: Debug {
    /// Forecast `horizon` periods past the end of the training data
    fn forecast(&self, horizon: usize, confidence_level: f64) -> Result<ModelForecast>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fitted to a series of daily values
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedForecastModel;

    /// Fit the model to the series
    fn fit(&self, values: &[f64]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod arima;
