//! # Demand Forecast
//!
//! Daily occupancy forecasting from reservation histories.
//!
//! ## Features
//!
//! - Reservation records from the reservation store (HTTP), JSON or CSV exports
//! - Aggregation into a gap-free daily count series
//! - Augmented Dickey-Fuller stationarity test choosing the differencing order
//! - ARIMA(p, d, 0) forecasts with confidence bounds
//! - Chart-ready output: non-negative, rounded, `lower <= value <= upper`
//!
//! ## Quick Start
//!
//! ```rust
//! use demand_forecast::{ForecastPipeline, ReservationRecord};
//!
//! let records: Vec<ReservationRecord> = (1..=28)
//!     .flat_map(|day| {
//!         let count = 2 + day % 3;
//!         (0..count).map(move |_| ReservationRecord::new(format!("2024-02-{:02} 19:30", day)))
//!     })
//!     .collect();
//!
//! let result = ForecastPipeline::default().run(&records);
//! assert_eq!(result.history_values.len(), 28);
//! assert_eq!(result.forecast_values.len(), 14);
//! ```
//!
//! Failures never surface as errors from [`ForecastPipeline::run`]: a
//! failed fetch or an empty history gives an empty result and a failed fit
//! gives the history alone. [`ForecastPipeline::run_detailed`] reports
//! which of these happened.

pub mod aggregation;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sanitize;
pub mod service;
pub mod source;
pub mod stationarity;
pub mod synthetic;
pub mod utils;

// Re-export commonly used types
pub use crate::aggregation::{aggregate, Aggregation};
pub use crate::config::{AppConfig, BackendConfig, ForecastConfig};
pub use crate::data::{DailySeries, ReservationRecord};
pub use crate::error::{ForecastError, Result};
pub use crate::models::{FittedForecastModel, ForecastModel, ModelForecast};
pub use crate::pipeline::ForecastPipeline;
pub use crate::report::{ForecastReport, ForecastResult, ForecastStatus};
pub use crate::service::ForecastService;
pub use crate::source::{
    AsyncReservationSource, CsvFileSource, HttpReservationSource, InMemorySource, JsonFileSource,
    ReservationSource,
};
pub use crate::stationarity::DifferencingOrder;
