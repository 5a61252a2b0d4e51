//! Turn unordered reservation records into a gap-free daily series

use crate::data::{DailySeries, ReservationRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, trace, warn};

/// Histories longer than this many days are logged as suspicious
pub const LONG_SPAN_DAYS: i64 = 3660;

/// Outcome of aggregating a batch of records
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// At least one record parsed; daily counts over its full date range
    Series(DailySeries),
    /// No record carried a usable start timestamp
    EmptyHistory,
}

impl Aggregation {
    /// The series, if any
    pub fn series(&self) -> Option<&DailySeries> {
        match self {
            Aggregation::Series(series) => Some(series),
            Aggregation::EmptyHistory => None,
        }
    }
}

/// Aggregation together with the number of records that were dropped
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationReport {
    pub aggregation: Aggregation,
    pub parsed_records: usize,
    pub skipped_records: usize,
}

/// Count reservations per calendar day over `[first day, last day]`.
///
/// Days without reservations inside the range are present with a zero
/// count. Records whose start timestamp is missing or unparseable are
/// skipped.
pub fn aggregate(records: &[ReservationRecord]) -> Aggregation {
    aggregate_with_report(records).aggregation
}

/// Same as [`aggregate`], also reporting how many records were dropped
pub fn aggregate_with_report(records: &[ReservationRecord]) -> AggregationReport {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut skipped_records = 0;

    for record in records {
        match record.parsed_start() {
            Some(start) => *per_day.entry(start.date()).or_insert(0) += 1,
            None => {
                trace!(
                    raw = ?record.start_timestamp,
                    "skipping reservation without a usable start"
                );
                skipped_records += 1;
            }
        }
    }

    let parsed_records = records.len() - skipped_records;
    if skipped_records > 0 {
        debug!(skipped_records, parsed_records, "dropped unparseable reservations");
    }

    let aggregation = match (per_day.keys().next(), per_day.keys().next_back()) {
        (Some(&first), Some(&last)) => {
            Aggregation::Series(reindex_daily(&per_day, first, last))
        }
        _ => Aggregation::EmptyHistory,
    };

    AggregationReport {
        aggregation,
        parsed_records,
        skipped_records,
    }
}

fn reindex_daily(
    per_day: &BTreeMap<NaiveDate, u64>,
    first: NaiveDate,
    last: NaiveDate,
) -> DailySeries {
    let span_days = (last - first).num_days() + 1;
    if span_days > LONG_SPAN_DAYS {
        warn!(
            span_days,
            first = %first,
            last = %last,
            "reservation history spans an unusually long period, check for mistyped dates"
        );
    }

    let counts = first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| per_day.get(&day).copied().unwrap_or(0) as f64)
        .collect();

    DailySeries::from_counts_unchecked(first, counts)
}
