//! Stationarity classification with the augmented Dickey-Fuller test
//!
//! The test regresses the first difference of the series on its lagged
//! level, a constant and a number of lagged differences chosen by AIC.
//! A large p-value means the unit-root hypothesis can't be rejected and the
//! series is differenced once before fitting.

use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use forecast_math::autoregressive::difference;
use forecast_math::descriptive::is_constant;
use forecast_math::distributions::mackinnon_p_value;
use forecast_math::regression::OlsFit;
use serde::Serialize;
use tracing::debug;

/// Default significance level of the unit-root test
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// How many times the series is differenced before fitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "usize")]
pub enum DifferencingOrder {
    /// Fit on levels (d = 0)
    Level,
    /// Fit on first differences (d = 1)
    FirstDifference,
}

impl DifferencingOrder {
    /// The order as the `d` of ARIMA(p, d, q)
    pub fn order(self) -> usize {
        match self {
            DifferencingOrder::Level => 0,
            DifferencingOrder::FirstDifference => 1,
        }
    }
}

impl From<DifferencingOrder> for usize {
    fn from(order: DifferencingOrder) -> Self {
        order.order()
    }
}

/// Augmented Dickey-Fuller test output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdfResult {
    /// t statistic of the lagged level coefficient
    pub statistic: f64,
    /// MacKinnon approximate p-value
    pub p_value: f64,
    /// Lagged differences included in the final regression
    pub used_lag: usize,
    /// Observations in the final regression
    pub nobs: usize,
}

/// Run the augmented Dickey-Fuller test (constant, no trend) on `values`.
///
/// Non-finite values are left out of the test input.
pub fn adf_test(values: &[f64]) -> Result<AdfResult> {
    let x: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let n = x.len();

    // ceil(12 * (n / 100)^(1/4)), capped so every candidate regression has
    // more rows than regressors
    let cap = (n / 2) as i64 - 2;
    if cap < 0 {
        return Err(ForecastError::InsufficientHistory {
            required: 4,
            actual: n,
        });
    }
    let schwert = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as i64;
    let max_lag = schwert.min(cap) as usize;

    if is_constant(&x, 1e-12) {
        return Err(ForecastError::StationarityTest(
            "Series is constant".to_string(),
        ));
    }

    let diffs = difference(&x, 1);
    if is_constant(&diffs, 1e-12) {
        return Err(ForecastError::StationarityTest(
            "Series changes by the same amount every step".to_string(),
        ));
    }

    // Pick the lag on the sample shared by every candidate
    let mut best: Option<(f64, usize)> = None;
    for lag in 0..=max_lag {
        let (rows, response) = adf_design(&x, &diffs, lag, max_lag);
        let fit = match OlsFit::fit_with_intercept(&rows, &response) {
            Ok(fit) => fit,
            Err(err) => {
                debug!(lag, error = %err, "skipping lag in ADF lag search");
                continue;
            }
        };

        let aic = fit.aic();
        if !aic.is_finite() {
            continue;
        }
        if best.map_or(true, |(best_aic, _)| aic < best_aic) {
            best = Some((aic, lag));
        }
    }

    let (_, used_lag) = best.ok_or_else(|| {
        ForecastError::StationarityTest("No lag length produced a usable regression".to_string())
    })?;

    let (rows, response) = adf_design(&x, &diffs, used_lag, used_lag);
    let fit = OlsFit::fit_with_intercept(&rows, &response)?;

    // Coefficient 1 belongs to the lagged level, right after the intercept
    let statistic = fit.t_statistic(1)?;
    if !statistic.is_finite() {
        return Err(ForecastError::StationarityTest(
            "Test statistic is not finite".to_string(),
        ));
    }
    let p_value = mackinnon_p_value(statistic)?;

    Ok(AdfResult {
        statistic,
        p_value,
        used_lag,
        nobs: fit.nobs(),
    })
}

/// Regressor rows `[x_{t-1}, dx_{t-1}, .., dx_{t-lag}]` and response `dx_t`,
/// starting after `skip` leading differences. The intercept is added by the
/// regression.
fn adf_design(
    levels: &[f64],
    diffs: &[f64],
    lag: usize,
    skip: usize,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut rows = Vec::with_capacity(diffs.len().saturating_sub(skip));
    let mut response = Vec::with_capacity(diffs.len().saturating_sub(skip));

    for t in skip..diffs.len() {
        let mut row = Vec::with_capacity(lag + 1);
        // diffs[t] = levels[t + 1] - levels[t]
        row.push(levels[t]);
        row.extend((1..=lag).map(|j| diffs[t - j]));

        rows.push(row);
        response.push(diffs[t]);
    }

    (rows, response)
}

/// The classifier's decision plus what it was based on
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationarityDecision {
    pub order: DifferencingOrder,
    /// Present when the test could be computed
    pub test: Option<AdfResult>,
    /// Why the test was skipped, when it was
    pub fallback_reason: Option<String>,
}

/// Decide the differencing order for `values`.
///
/// A p-value above `significance` selects first differencing. If the test
/// can't be computed the series is fitted on levels.
pub fn classify(values: &[f64], significance: f64) -> StationarityDecision {
    match adf_test(values) {
        Ok(test) => {
            let order = if test.p_value > significance {
                DifferencingOrder::FirstDifference
            } else {
                DifferencingOrder::Level
            };
            debug!(
                statistic = test.statistic,
                p_value = test.p_value,
                used_lag = test.used_lag,
                d = order.order(),
                "stationarity test complete"
            );
            StationarityDecision {
                order,
                test: Some(test),
                fallback_reason: None,
            }
        }
        Err(err) => {
            debug!(error = %err, "stationarity test unavailable, fitting on levels");
            StationarityDecision {
                order: DifferencingOrder::Level,
                test: None,
                fallback_reason: Some(err.to_string()),
            }
        }
    }
}

/// Differencing order for a daily series
pub fn choose_differencing(series: &DailySeries, significance: f64) -> DifferencingOrder {
    classify(series.values(), significance).order
}
