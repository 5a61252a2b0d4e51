//! Forecast output handed to charting and serialization layers

use crate::error::Result;
use crate::stationarity::StationarityDecision;
use serde::{Deserialize, Serialize};

/// Daily history and forecast as parallel arrays.
///
/// The four forecast arrays are either all empty or all of the same
/// length; they are never omitted from the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    pub history_labels: Vec<String>,
    pub history_values: Vec<f64>,
    pub forecast_labels: Vec<String>,
    pub forecast_values: Vec<f64>,
    pub lower_bound: Vec<f64>,
    pub upper_bound: Vec<f64>,
}

impl ForecastResult {
    /// Result with no history and no forecast
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a forecast was produced
    pub fn has_forecast(&self) -> bool {
        !self.forecast_values.is_empty()
    }

    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.forecast_values.len()
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// How far the pipeline got
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForecastStatus {
    /// History and forecast are both populated
    Complete,
    /// Nothing to show: the fetch failed or no record was usable
    NoData { reason: String },
    /// History is populated but the model could not produce a forecast
    HistoryOnly { reason: String },
}

/// Result plus the diagnostics behind it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub result: ForecastResult,
    pub status: ForecastStatus,
    /// Present once a series reached the classifier
    pub stationarity: Option<StationarityDecision>,
    /// Name of the fitted model, e.g. `ARIMA(5,0,0)`
    pub model: Option<String>,
    pub parsed_records: usize,
    pub skipped_records: usize,
}

impl ForecastReport {
    /// Report for a request that produced nothing
    pub fn no_data(reason: impl Into<String>) -> Self {
        Self {
            result: ForecastResult::empty(),
            status: ForecastStatus::NoData {
                reason: reason.into(),
            },
            stationarity: None,
            model: None,
            parsed_records: 0,
            skipped_records: 0,
        }
    }

    /// Whether the model produced a forecast
    pub fn is_complete(&self) -> bool {
        self.status == ForecastStatus::Complete
    }
}
