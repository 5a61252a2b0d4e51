use chrono::{Duration, NaiveDate};
use demand_forecast::aggregation::aggregate_with_report;
use demand_forecast::{aggregate, Aggregation, ReservationRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_day_one_and_day_ten() {
    let records = vec![
        ReservationRecord::new("2024-05-10T09:00:00"),
        ReservationRecord::new("2024-05-01 18:45"),
        ReservationRecord::new("2024-05-01T07:30:00"),
    ];

    let series = aggregate(&records).series().cloned().unwrap();

    assert_eq!(series.len(), 10);
    assert_eq!(series.start_date(), date(2024, 5, 1));
    assert_eq!(series.end_date(), date(2024, 5, 10));
    assert_eq!(series.values(), &[2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
}

#[rstest]
#[case(vec!["2024-01-01T10:00:00"], 1)]
#[case(vec!["2024-01-31T23:59:59", "2024-02-01T00:00:00"], 2)]
#[case(vec!["2024-02-28T12:00:00", "2024-03-01T12:00:00"], 3)]
#[case(vec!["2023-12-30 08:00", "2024-01-02 08:00", "2023-12-31 08:00"], 4)]
fn test_series_covers_every_day(#[case] raw: Vec<&str>, #[case] expected_days: usize) {
    let records: Vec<ReservationRecord> = raw.into_iter().map(ReservationRecord::new).collect();
    let series = aggregate(&records).series().cloned().unwrap();

    assert_eq!(series.len(), expected_days);

    let dates = series.dates();
    for pair in dates.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(1));
    }

    let total: f64 = series.values().iter().sum();
    assert_eq!(total, records.len() as f64);
}

#[test]
fn test_time_of_day_is_ignored() {
    let records = vec![
        ReservationRecord::new("2024-07-04T00:00:00"),
        ReservationRecord::new("2024-07-04T12:30:00"),
        ReservationRecord::new("2024-07-04T23:59:59"),
    ];

    let series = aggregate(&records).series().cloned().unwrap();
    assert_eq!(series.entries(), vec![(date(2024, 7, 4), 3.0)]);
}

#[test]
fn test_bad_records_are_skipped() {
    let records = vec![
        ReservationRecord::new("2024-03-02T10:00:00"),
        ReservationRecord::new("02/03/2024"),
        ReservationRecord::default(),
        ReservationRecord::new("2024-03-04T10:00:00"),
    ];

    let report = aggregate_with_report(&records);

    assert_eq!(report.parsed_records, 2);
    assert_eq!(report.skipped_records, 2);

    let series = report.aggregation.series().unwrap();
    assert_eq!(series.values(), &[1.0, 0.0, 1.0]);
    assert_eq!(series.count_on(date(2024, 3, 3)), Some(0.0));
    assert_eq!(series.count_on(date(2024, 3, 5)), None);
}

#[test]
fn test_nothing_usable() {
    assert_eq!(aggregate(&[]), Aggregation::EmptyHistory);
    assert_eq!(
        aggregate(&[ReservationRecord::new("not a date")]),
        Aggregation::EmptyHistory
    );
}
