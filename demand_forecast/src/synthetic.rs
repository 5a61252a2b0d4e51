//! Synthetic reservation histories for demos and tests

use crate::data::ReservationRecord;
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

/// Generate `days` days of reservations starting at `start`.
///
/// Daily counts are Poisson with mean `mean_per_day`; each reservation gets
/// a random time of day. The same seed always yields the same records.
pub fn generate_reservations(
    start: NaiveDate,
    days: usize,
    mean_per_day: f64,
    seed: u64,
) -> Result<Vec<ReservationRecord>> {
    if !(mean_per_day.is_finite() && mean_per_day > 0.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "mean_per_day must be positive, got {}",
            mean_per_day
        )));
    }

    let poisson = Poisson::new(mean_per_day)
        .map_err(|e| ForecastError::InvalidParameter(e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for offset in 0..days {
        let day = start + Duration::days(offset as i64);
        let count: f64 = poisson.sample(&mut rng);

        for _ in 0..count as usize {
            let seconds = rng.gen_range(0..86_400);
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                .unwrap_or_default();
            let timestamp = day.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string();
            records.push(ReservationRecord::new(timestamp));
        }
    }

    Ok(records)
}
