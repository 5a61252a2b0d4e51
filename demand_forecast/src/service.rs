//! Async front end for the pipeline
//!
//! Fetching is I/O bound and runs on the async runtime; the numerical
//! work runs on the blocking thread pool so request handlers stay
//! responsive.

use crate::error::ForecastError;
use crate::pipeline::ForecastPipeline;
use crate::report::{ForecastReport, ForecastResult};
use crate::source::AsyncReservationSource;
use tracing::{info, warn};

/// Pairs a reservation source with a pipeline
#[derive(Debug, Clone)]
pub struct ForecastService<S> {
    source: S,
    pipeline: ForecastPipeline,
}

impl<S: AsyncReservationSource> ForecastService<S> {
    pub fn new(source: S, pipeline: ForecastPipeline) -> Self {
        Self { source, pipeline }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn pipeline(&self) -> &ForecastPipeline {
        &self.pipeline
    }

    /// Fetch reservations and forecast. Never fails: a failed fetch or a
    /// crashed worker gives an empty result.
    pub async fn forecast(&self) -> ForecastReport {
        let records = match self.source.fetch_reservations().await {
            Ok(records) => records,
            Err(err) => {
                warn!(source = self.source.name(), error = %err, "reservation fetch failed");
                return ForecastReport::no_data(err.to_string());
            }
        };
        info!(source = self.source.name(), records = records.len(), "reservations fetched");

        let pipeline = self.pipeline.clone();
        match tokio::task::spawn_blocking(move || pipeline.run_detailed(&records)).await {
            Ok(report) => report,
            Err(err) => {
                let err = ForecastError::from(err);
                warn!(error = %err, "forecast worker did not finish");
                ForecastReport::no_data(err.to_string())
            }
        }
    }

    /// Like [`forecast`](Self::forecast), returning only the result
    pub async fn forecast_result(&self) -> ForecastResult {
        self.forecast().await.result
    }
}
