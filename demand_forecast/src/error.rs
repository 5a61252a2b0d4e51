//! Error types for the demand_forecast crate

use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Reservations could not be fetched or none of them were usable
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Series too short for the requested computation
    #[error("Insufficient history: need at least {required} observations, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// The unit-root test could not be computed
    #[error("Stationarity test error: {0}")]
    StationarityTest(String),

    /// Model fitting or forecasting failed
    #[error("Model fit error: {0}")]
    ModelFit(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error while loading or validating configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Error from numerical routines
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error reading CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error talking to the reservation store
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A pipeline worker panicked or was cancelled
    #[error("Worker error: {0}")]
    Worker(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<tokio::task::JoinError> for ForecastError {
    fn from(err: tokio::task::JoinError) -> Self {
        ForecastError::Worker(err.to_string())
    }
}

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::Config(err.to_string())
    }
}
