//! The forecasting pipeline: aggregate, classify, fit, assemble
//!
//! Every path through the pipeline ends in a renderable
//! [`ForecastResult`]. Fetch failures and empty histories give an empty
//! result, a failed fit gives the history without a forecast.

use crate::aggregation::{aggregate_with_report, Aggregation};
use crate::config::ForecastConfig;
use crate::data::{DailySeries, ReservationRecord};
use crate::error::Result;
use crate::models::arima::ArimaModel;
use crate::models::{FittedForecastModel, ForecastModel, ModelForecast};
use crate::report::{ForecastReport, ForecastResult, ForecastStatus};
use crate::sanitize::assemble;
use crate::source::ReservationSource;
use crate::stationarity::{classify, DifferencingOrder};
use std::fmt;
use tracing::{debug, info, warn};

/// Pipeline stages, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Aggregating,
    Classifying,
    Fitting,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching",
            Stage::Aggregating => "aggregating",
            Stage::Classifying => "classifying",
            Stage::Fitting => "fitting",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of the fitting stage
#[derive(Debug, Clone)]
pub enum FitOutcome {
    /// Forecast clipped at zero, ready to assemble
    Fitted { model: String, forecast: ModelForecast },
    /// The model could not be fitted or could not forecast
    Failed { model: String, reason: String },
}

/// Stateless forecasting pipeline; each run starts from scratch
#[derive(Debug, Clone, Default)]
pub struct ForecastPipeline {
    config: ForecastConfig,
}

impl ForecastPipeline {
    /// Create a pipeline, rejecting unusable parameters
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast from already fetched records
    pub fn run(&self, records: &[ReservationRecord]) -> ForecastResult {
        self.run_detailed(records).result
    }

    /// Fetch from `source`, then forecast. A failed fetch yields an empty
    /// result.
    pub fn run_from_source(&self, source: &dyn ReservationSource) -> ForecastReport {
        debug!(stage = %Stage::Fetching, source = source.name());
        match source.list_reservations() {
            Ok(records) => self.run_detailed(&records),
            Err(err) => {
                warn!(source = source.name(), error = %err, "reservation fetch failed");
                ForecastReport::no_data(err.to_string())
            }
        }
    }

    /// Forecast from already fetched records, with diagnostics
    pub fn run_detailed(&self, records: &[ReservationRecord]) -> ForecastReport {
        debug!(stage = %Stage::Aggregating, records = records.len());
        let aggregated = aggregate_with_report(records);

        let series = match aggregated.aggregation {
            Aggregation::Series(series) => series,
            Aggregation::EmptyHistory => {
                info!(stage = %Stage::Done, "no usable reservations, returning empty forecast");
                return ForecastReport {
                    skipped_records: aggregated.skipped_records,
                    ..ForecastReport::no_data("No reservation with a usable start timestamp")
                };
            }
        };

        debug!(
            stage = %Stage::Classifying,
            days = series.len(),
            first = %series.start_date(),
            last = %series.end_date()
        );
        let decision = classify(series.values(), self.config.significance_level);

        debug!(stage = %Stage::Fitting, d = decision.order.order());
        let (result, status, model) = match self.fit_forecast(&series, decision.order) {
            FitOutcome::Fitted { model, forecast } => (
                assemble(&series, Some(&forecast)),
                ForecastStatus::Complete,
                model,
            ),
            FitOutcome::Failed { model, reason } => {
                warn!(model = %model, reason = %reason, "model fit failed, returning history only");
                (
                    assemble(&series, None),
                    ForecastStatus::HistoryOnly { reason },
                    model,
                )
            }
        };

        info!(
            stage = %Stage::Done,
            history_days = result.history_values.len(),
            forecast_days = result.forecast_values.len(),
            "forecast assembled"
        );

        ForecastReport {
            result,
            status,
            stationarity: Some(decision),
            model: Some(model),
            parsed_records: aggregated.parsed_records,
            skipped_records: aggregated.skipped_records,
        }
    }

    /// Fit ARIMA(p, d, 0) to the series and forecast the configured horizon
    pub fn fit_forecast(&self, series: &DailySeries, order: DifferencingOrder) -> FitOutcome {
        let p = self.config.autoregressive_order;
        let d = order.order();
        let label = format!("ARIMA({},{},0)", p, d);

        let outcome = ArimaModel::new(p, d, 0).and_then(|model| {
            let fitted = model.fit(series.values())?;
            let forecast =
                fitted.forecast(self.config.horizon_days, self.config.confidence_level)?;
            Ok((model.name().to_string(), forecast.clip_at_zero()))
        });

        match outcome {
            Ok((model, forecast)) => FitOutcome::Fitted { model, forecast },
            Err(err) => FitOutcome::Failed {
                model: label,
                reason: err.to_string(),
            },
        }
    }
}
