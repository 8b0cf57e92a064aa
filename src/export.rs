//! Forecast and result export.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::model::forecast::ForecastPoint;
use crate::model::simulation::SimulationResult;

/// Default export name, e.g. `forecast_random_forest_2024-01-08.csv`.
pub fn default_forecast_name(model_name: &str, first_day: NaiveDate) -> String {
    let slug = model_name.to_lowercase().replace(' ', "_");
    format!("forecast_{}_{}.csv", slug, first_day.format("%Y-%m-%d"))
}

/// Writes the forecast blocks and their confidence band as CSV.
pub fn write_forecast_csv(
    path: &Path,
    forecasts: &[ForecastPoint],
    model_name: &str,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer
        .write_record([
            "Date",
            "Time Block",
            "Predicted Price",
            "Lower Bound",
            "Upper Bound",
            "Model",
        ])
        .context("failed to write CSV header")?;
    for f in forecasts {
        let predicted = format!("{:.4}", f.predicted_price);
        let lower = format!("{:.4}", f.lower_bound);
        let upper = format!("{:.4}", f.upper_bound);
        writer
            .write_record([
                f.day_label.as_str(),
                f.time_block.as_str(),
                predicted.as_str(),
                lower.as_str(),
                upper.as_str(),
                model_name,
            ])
            .with_context(|| {
                format!("failed to write row for {} {}", f.day_label, f.time_block)
            })?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}

/// Serializes the whole simulation result as pretty-printed JSON.
pub fn write_result_json(path: &Path, result: &SimulationResult) -> Result<()> {
    let json =
        serde_json::to_string_pretty(result).context("failed to serialize simulation result")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
