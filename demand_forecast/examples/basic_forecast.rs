use chrono::NaiveDate;
use demand_forecast::synthetic::generate_reservations;
use demand_forecast::{ForecastPipeline, ForecastStatus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Demand Forecast: Basic Forecasting Example");
    println!("==========================================\n");

    // Two months of reservations, about five per day
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).ok_or("invalid start date")?;
    let records = generate_reservations(start, 60, 5.0, 2024)?;
    println!("Generated {} reservations over 60 days\n", records.len());

    let report = ForecastPipeline::default().run_detailed(&records);

    if let Some(decision) = &report.stationarity {
        match &decision.test {
            Some(test) => println!(
                "ADF statistic {:.3}, p-value {:.4} -> d = {}",
                test.statistic,
                test.p_value,
                decision.order.order()
            ),
            None => println!("Stationarity test skipped -> d = {}", decision.order.order()),
        }
    }
    if let Some(model) = &report.model {
        println!("Model: {}\n", model);
    }

    let result = &report.result;
    println!("Last week of history:");
    let skip = result.history_labels.len().saturating_sub(7);
    for (label, value) in result.history_labels.iter().zip(&result.history_values).skip(skip) {
        println!("  {}: {}", label, value);
    }

    match &report.status {
        ForecastStatus::Complete => {
            println!("\nForecast with 95% bounds:");
            for i in 0..result.horizon() {
                println!(
                    "  {}: {:.2} ({:.2}, {:.2})",
                    result.forecast_labels[i],
                    result.forecast_values[i],
                    result.lower_bound[i],
                    result.upper_bound[i]
                );
            }
        }
        ForecastStatus::HistoryOnly { reason } | ForecastStatus::NoData { reason } => {
            println!("\nNo forecast: {}", reason);
        }
    }

    Ok(())
}
