use chrono::{Duration, NaiveDate};
use demand_forecast::models::arima::ArimaModel;
use demand_forecast::stationarity::{choose_differencing, DEFAULT_SIGNIFICANCE_LEVEL};
use demand_forecast::synthetic::generate_reservations;
use demand_forecast::{
    aggregate, DailySeries, DifferencingOrder, FittedForecastModel, ForecastConfig, ForecastError,
    ForecastModel, ForecastPipeline, ForecastResult, ForecastStatus, InMemorySource,
    ReservationRecord, ReservationSource,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
}

fn records_from_counts(counts: &[usize]) -> Vec<ReservationRecord> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(i, &count)| {
            (0..count).map(move |k| {
                ReservationRecord::new(format!("{} {:02}:15:00", day(i as i64), 8 + k % 12))
            })
        })
        .collect()
}

fn sparse_counts(days: usize) -> Vec<usize> {
    (0..days)
        .map(|i| match i % 7 {
            0 => 1,
            3 => 2,
            _ => 0,
        })
        .collect()
}

fn assert_chart_ready(result: &ForecastResult) {
    assert_eq!(result.forecast_labels.len(), result.forecast_values.len());
    assert_eq!(result.lower_bound.len(), result.forecast_values.len());
    assert_eq!(result.upper_bound.len(), result.forecast_values.len());
    assert_eq!(result.history_labels.len(), result.history_values.len());

    for i in 0..result.horizon() {
        assert!(result.lower_bound[i] >= 0.0);
        assert!(result.forecast_values[i] >= 0.0);
        assert!(result.upper_bound[i] >= 0.0);
        assert!(result.lower_bound[i] <= result.forecast_values[i]);
        assert!(result.forecast_values[i] <= result.upper_bound[i]);
    }
}

struct FailingSource;

impl ReservationSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    fn list_reservations(&self) -> demand_forecast::Result<Vec<ReservationRecord>> {
        Err(ForecastError::DataUnavailable("connection refused".to_string()))
    }
}

#[test]
fn test_one_reservation_per_day() {
    let records = records_from_counts(&[1; 30]);
    let report = ForecastPipeline::default().run_detailed(&records);

    assert_eq!(report.status, ForecastStatus::Complete);
    assert_eq!(report.result.history_values, vec![1.0; 30]);
    assert_eq!(report.result.history_labels.first().unwrap(), "2024-01-01");
    assert_eq!(report.result.history_labels.last().unwrap(), "2024-01-30");

    let decision = report.stationarity.unwrap();
    assert_eq!(decision.order, DifferencingOrder::Level);

    let series = aggregate(&records).series().cloned().unwrap();
    assert_eq!(
        choose_differencing(&series, DEFAULT_SIGNIFICANCE_LEVEL),
        decision.order
    );

    assert_eq!(report.result.forecast_values.len(), 14);
    assert_eq!(report.result.forecast_labels.first().unwrap(), "2024-01-31");
    assert_eq!(report.result.forecast_labels.last().unwrap(), "2024-02-13");
    for value in &report.result.forecast_values {
        assert!((value - 1.0).abs() < 1e-9);
    }
    assert_chart_ready(&report.result);
}

#[test]
fn test_empty_input_gives_empty_result() {
    let pipeline = ForecastPipeline::default();
    let result = pipeline.run(&[]);

    assert_eq!(result, ForecastResult::empty());

    let report = pipeline.run_detailed(&[]);
    assert!(matches!(report.status, ForecastStatus::NoData { .. }));
    assert!(report.stationarity.is_none());
    assert!(report.model.is_none());
}

#[test]
fn test_unparseable_records_only() {
    let records = vec![
        ReservationRecord::default(),
        ReservationRecord::new("next tuesday"),
        ReservationRecord::new(""),
    ];
    let report = ForecastPipeline::default().run_detailed(&records);

    assert_eq!(report.result, ForecastResult::empty());
    assert_eq!(report.skipped_records, 3);
    assert!(matches!(report.status, ForecastStatus::NoData { .. }));
}

#[test]
fn test_gap_days_are_zero_in_history() {
    let mut records = records_from_counts(&[2]);
    records.push(ReservationRecord::new(format!("{}T10:00:00", day(9))));

    let result = ForecastPipeline::default().run(&records);

    assert_eq!(result.history_values.len(), 10);
    assert_eq!(result.history_values[0], 2.0);
    assert_eq!(result.history_values[9], 1.0);
    assert!(result.history_values[1..9].iter().all(|v| *v == 0.0));
}

#[test]
fn test_negative_lower_bound_is_clipped() {
    let records = generate_reservations(day(0), 60, 0.5, 3).unwrap();
    let series = aggregate(&records).series().cloned().unwrap();

    // The raw interval dips below zero for a sparse series
    let raw = ArimaModel::new(5, 0, 0)
        .unwrap()
        .fit(series.values())
        .unwrap()
        .forecast(14, 0.95)
        .unwrap();
    assert!(raw.lower().iter().any(|lo| *lo < 0.0));

    let report = ForecastPipeline::default().run_detailed(&records);
    assert!(report.is_complete());
    assert!(report.result.lower_bound.iter().any(|lo| *lo == 0.0));
    assert_chart_ready(&report.result);
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(30)]
fn test_horizon_is_configurable(#[case] horizon: usize) {
    let pipeline = ForecastPipeline::new(ForecastConfig {
        horizon_days: horizon,
        ..ForecastConfig::default()
    })
    .unwrap();

    let result = pipeline.run(&records_from_counts(&sparse_counts(36)));

    assert_eq!(result.horizon(), horizon);
    assert_eq!(result.forecast_labels.first().unwrap(), "2024-02-06");
    assert_chart_ready(&result);
}

#[test]
fn test_short_history_returns_history_only() {
    let records = records_from_counts(&[3, 1, 2]);
    let report = ForecastPipeline::default().run_detailed(&records);

    assert!(matches!(report.status, ForecastStatus::HistoryOnly { .. }));
    assert_eq!(report.result.history_values, vec![3.0, 1.0, 2.0]);
    assert!(!report.result.has_forecast());
    assert!(report.result.lower_bound.is_empty());
    assert!(report.result.upper_bound.is_empty());
    assert_eq!(report.model.as_deref(), Some("ARIMA(5,0,0)"));
}

#[test]
fn test_single_day_history() {
    let report = ForecastPipeline::default().run_detailed(&records_from_counts(&[4]));

    assert_eq!(report.result.history_labels, vec!["2024-01-01"]);
    assert_eq!(report.result.history_values, vec![4.0]);
    assert!(!report.result.has_forecast());

    let decision = report.stationarity.unwrap();
    assert_eq!(decision.order, DifferencingOrder::Level);
    assert!(decision.fallback_reason.is_some());
}

#[test]
fn test_run_from_failing_source() {
    let report = ForecastPipeline::default().run_from_source(&FailingSource);

    assert_eq!(report.result, ForecastResult::empty());
    match report.status {
        ForecastStatus::NoData { reason } => assert!(reason.contains("connection refused")),
        other => panic!("expected NoData, got {:?}", other),
    }
}

#[test]
fn test_run_from_memory_source() {
    let start = day(0);
    let records = generate_reservations(start, 60, 5.0, 11).unwrap();
    let source = InMemorySource::new(records.clone());

    let pipeline = ForecastPipeline::default();
    let from_source = pipeline.run_from_source(&source);

    assert_eq!(from_source.result, pipeline.run(&records));
    assert_eq!(from_source.parsed_records, records.len());
    assert_eq!(from_source.result.horizon(), 14);
    assert_chart_ready(&from_source.result);
}

#[test]
fn test_runs_are_independent() {
    let pipeline = ForecastPipeline::default();
    let records = records_from_counts(&sparse_counts(30));

    let first = pipeline.run(&records);
    let _ = pipeline.run(&records_from_counts(&[9; 40]));
    let second = pipeline.run(&records);

    assert_eq!(first, second);
}

#[test]
fn test_report_serializes_status() {
    let report = ForecastPipeline::default().run_detailed(&records_from_counts(&[1; 30]));
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["status"]["kind"], "complete");
    assert_eq!(value["model"], "ARIMA(5,0,0)");
    assert_eq!(value["stationarity"]["order"], 0);
    assert_eq!(value["result"]["forecastValues"].as_array().unwrap().len(), 14);
}

#[test]
fn test_series_fit_matches_pipeline() {
    let counts = sparse_counts(30);
    let series = DailySeries::new(day(0), counts.iter().map(|c| *c as f64).collect()).unwrap();
    let pipeline = ForecastPipeline::default();

    let outcome = pipeline.fit_forecast(&series, DifferencingOrder::Level);
    assert!(matches!(outcome, demand_forecast::pipeline::FitOutcome::Fitted { .. }));
}
