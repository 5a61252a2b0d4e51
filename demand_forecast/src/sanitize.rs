//! Assemble the final result from a series and an optional model forecast

use crate::data::DailySeries;
use crate::models::ModelForecast;
use crate::report::ForecastResult;
use crate::utils::{date_label, finite_or_zero, future_dates, round_to};

/// Decimal places kept for forecast values and bounds
pub const FORECAST_DECIMALS: u32 = 2;

/// Build the result for `series`, with forecast arrays when `forecast` is
/// present.
///
/// Forecast labels start the day after the last history day. Values and
/// bounds are made finite, clipped at zero and rounded; the ordering
/// `lower <= value <= upper` is enforced on the sanitized numbers.
pub fn assemble(series: &DailySeries, forecast: Option<&ModelForecast>) -> ForecastResult {
    let mut result = history_only(series);

    if let Some(forecast) = forecast {
        let horizon = forecast.horizon();
        result.forecast_labels = future_dates(series.end_date(), horizon)
            .into_iter()
            .map(date_label)
            .collect();

        let mut values = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for i in 0..horizon {
            let value = sanitize_value(forecast.values()[i]);
            let lo = sanitize_value(forecast.lower()[i]).min(value);
            let hi = sanitize_value(forecast.upper()[i]).max(value);

            values.push(value);
            lower.push(lo);
            upper.push(hi);
        }

        result.forecast_values = values;
        result.lower_bound = lower;
        result.upper_bound = upper;
    }

    result
}

/// Result with history arrays only
pub fn history_only(series: &DailySeries) -> ForecastResult {
    ForecastResult {
        history_labels: series.dates().into_iter().map(date_label).collect(),
        history_values: series.values().iter().map(|v| finite_or_zero(*v).round()).collect(),
        ..ForecastResult::default()
    }
}

fn sanitize_value(value: f64) -> f64 {
    round_to(finite_or_zero(value).max(0.0), FORECAST_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series() -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        DailySeries::new(start, vec![2.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_history_only() {
        let result = assemble(&series(), None);
        assert_eq!(result.history_labels, vec!["2024-12-30", "2024-12-31", "2025-01-01"]);
        assert_eq!(result.history_values, vec![2.0, 0.0, 1.0]);
        assert!(!result.has_forecast());
        assert!(result.forecast_labels.is_empty());
        assert!(result.lower_bound.is_empty());
        assert!(result.upper_bound.is_empty());
    }

    #[test]
    fn test_forecast_is_clipped_rounded_and_aligned() {
        let forecast = ModelForecast::new(
            vec![1.23456, -0.4, f64::NAN],
            vec![-0.5, -1.0, 0.3],
            vec![2.987, 0.2, f64::INFINITY],
        )
        .unwrap();

        let result = assemble(&series(), Some(&forecast));
        assert_eq!(result.forecast_labels, vec!["2025-01-02", "2025-01-03", "2025-01-04"]);
        assert_eq!(result.forecast_values, vec![1.23, 0.0, 0.0]);
        assert_eq!(result.lower_bound, vec![0.0, 0.0, 0.0]);
        assert_eq!(result.upper_bound, vec![2.99, 0.2, 0.0]);

        for i in 0..result.horizon() {
            assert!(result.lower_bound[i] <= result.forecast_values[i]);
            assert!(result.forecast_values[i] <= result.upper_bound[i]);
        }
    }
}
