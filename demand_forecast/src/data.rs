//! Reservation records and the daily count series built from them

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accepted start timestamp layouts, tried in order
pub const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Field names the reservation store may use for the start timestamp
pub const START_TIMESTAMP_FIELDS: [&str; 6] = [
    "fechaInicio",
    "fecha_inicio",
    "startTimestamp",
    "start_timestamp",
    "startDate",
    "start",
];

/// Parse a raw start timestamp, `None` when no accepted layout matches
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// One booking as returned by the reservation store.
///
/// Only the start timestamp is kept; it stays as raw text so malformed
/// values can be dropped during aggregation instead of failing the fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub start_timestamp: Option<String>,
}

impl ReservationRecord {
    /// Create a record with the given raw start timestamp
    pub fn new(start_timestamp: impl Into<String>) -> Self {
        Self {
            start_timestamp: Some(start_timestamp.into()),
        }
    }

    /// Build a record from one element of the store's JSON array
    pub fn from_json_value(value: &Value) -> Self {
        let start_timestamp = value.as_object().and_then(|fields| {
            START_TIMESTAMP_FIELDS
                .iter()
                .find_map(|name| fields.get(*name).and_then(Value::as_str))
                .map(str::to_string)
        });

        Self { start_timestamp }
    }

    /// The parsed start timestamp, if present and well formed
    pub fn parsed_start(&self) -> Option<NaiveDateTime> {
        self.start_timestamp.as_deref().and_then(parse_timestamp)
    }
}

/// Decode the store's response body into records.
///
/// The body must be a JSON array; elements without a usable start field
/// become records with no timestamp.
pub fn parse_reservations_json(body: &str) -> Result<Vec<ReservationRecord>> {
    let value: Value = serde_json::from_str(body)?;

    match value {
        Value::Array(items) => Ok(items.iter().map(ReservationRecord::from_json_value).collect()),
        other => Err(ForecastError::DataUnavailable(format!(
            "Expected a JSON array of reservations, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Daily reservation counts over a contiguous range of calendar days.
///
/// Stored as a start date plus one count per day, so consecutive entries
/// are always exactly one day apart.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NaiveDate,
    counts: Vec<f64>,
}

impl DailySeries {
    /// Create a series starting at `start` with one count per day
    pub fn new(start: NaiveDate, counts: Vec<f64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(ForecastError::InsufficientHistory {
                required: 1,
                actual: 0,
            });
        }

        if counts.iter().any(|c| !c.is_finite() || *c < 0.0) {
            return Err(ForecastError::InvalidParameter(
                "Daily counts must be finite and non-negative".to_string(),
            ));
        }

        Ok(Self { start, counts })
    }

    /// Counts built by the aggregator are non-empty and non-negative
    pub(crate) fn from_counts_unchecked(start: NaiveDate, counts: Vec<f64>) -> Self {
        debug_assert!(!counts.is_empty());
        Self { start, counts }
    }

    /// Number of days covered
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false; a series covers at least one day
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// First day of the series
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the series
    pub fn end_date(&self) -> NaiveDate {
        self.start + Duration::days(self.counts.len() as i64 - 1)
    }

    /// Daily counts in date order
    pub fn values(&self) -> &[f64] {
        &self.counts
    }

    /// Calendar days in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        (0..self.counts.len())
            .map(|offset| self.start + Duration::days(offset as i64))
            .collect()
    }

    /// `(date, count)` pairs in date order
    pub fn entries(&self) -> Vec<(NaiveDate, f64)> {
        self.dates().into_iter().zip(self.counts.iter().copied()).collect()
    }

    /// Count recorded for `date`, `None` outside the covered range
    pub fn count_on(&self, date: NaiveDate) -> Option<f64> {
        let offset = (date - self.start).num_days();
        if offset < 0 {
            return None;
        }
        self.counts.get(offset as usize).copied()
    }
}
