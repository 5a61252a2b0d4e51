//! # Occupancy Forecast
//!
//! Umbrella crate for the occupancy forecasting workspace.
//!
//! - [`math`]: regression, autoregression and unit-root statistics
//! - [`forecast`]: reservation aggregation, stationarity classification,
//!   ARIMA forecasting and chart-ready output
//!
//! ## Example
//!
//! ```
//! use occupancy_forecast_workspace::forecast::{ForecastPipeline, ForecastResult};
//!
//! let result = ForecastPipeline::default().run(&[]);
//! assert_eq!(result, ForecastResult::empty());
//! ```

pub use demand_forecast as forecast;
pub use forecast_math as math;

pub use demand_forecast::{ForecastPipeline, ForecastReport, ForecastResult, ForecastService};
