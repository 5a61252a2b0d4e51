//! Utility functions for the demand_forecast crate

use chrono::{Duration, NaiveDate};

/// Calendar-date label used in results
pub const DATE_LABEL_FORMAT: &str = "%Y-%m-%d";

/// Consecutive days following `last_date`
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map(|step| last_date + Duration::days(step as i64))
        .collect()
}

/// Format a date as a `YYYY-MM-DD` label
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Replace NaN and infinities with zero
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    // avoid "-0.0" in serialized output
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
