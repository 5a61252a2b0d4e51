//! Where reservation records come from
//!
//! The pipeline only needs a list of records; these sources fetch it from
//! the reservation store over HTTP, from exported files, or from memory.

use crate::config::BackendConfig;
use crate::data::{parse_reservations_json, ReservationRecord, START_TIMESTAMP_FIELDS};
use crate::error::{ForecastError, Result};
use reqwest::Client;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Blocking source of reservation records
pub trait ReservationSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch every reservation
    fn list_reservations(&self) -> Result<Vec<ReservationRecord>>;
}

/// Asynchronous source of reservation records
pub trait AsyncReservationSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch every reservation
    fn fetch_reservations(&self) -> impl Future<Output = Result<Vec<ReservationRecord>>> + Send;
}

/// Records held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<ReservationRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<ReservationRecord>) -> Self {
        Self { records }
    }
}

impl ReservationSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn list_reservations(&self) -> Result<Vec<ReservationRecord>> {
        Ok(self.records.clone())
    }
}

impl AsyncReservationSource for InMemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_reservations(&self) -> Result<Vec<ReservationRecord>> {
        Ok(self.records.clone())
    }
}

/// JSON array exported from the reservation store
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReservationSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn list_reservations(&self) -> Result<Vec<ReservationRecord>> {
        let body = fs::read_to_string(&self.path)?;
        parse_reservations_json(&body)
    }
}

/// CSV export with a header row.
///
/// The start timestamp column is matched case-insensitively against the
/// same field names the JSON decoder accepts.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReservationSource for CsvFileSource {
    fn name(&self) -> &str {
        "csv-file"
    }

    fn list_reservations(&self) -> Result<Vec<ReservationRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let column = START_TIMESTAMP_FIELDS
            .iter()
            .find_map(|field| {
                headers
                    .iter()
                    .position(|header| header.trim().eq_ignore_ascii_case(field))
            })
            .ok_or_else(|| {
                ForecastError::DataUnavailable(format!(
                    "No start timestamp column in {}",
                    self.path.display()
                ))
            })?;

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let start_timestamp = row
                .get(column)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string);
            records.push(ReservationRecord { start_timestamp });
        }

        Ok(records)
    }
}

/// The reservation store's listing endpoint
#[derive(Debug, Clone)]
pub struct HttpReservationSource {
    client: Client,
    url: String,
}

impl HttpReservationSource {
    /// Client with the configured request timeout
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            url: config.reservations_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AsyncReservationSource for HttpReservationSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_reservations(&self) -> Result<Vec<ReservationRecord>> {
        debug!(url = %self.url, "fetching reservations");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::DataUnavailable(format!(
                "Reservation store returned {}",
                status
            )));
        }

        let body = response.text().await?;
        parse_reservations_json(&body)
    }
}
