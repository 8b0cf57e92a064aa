//! End-to-end simulation pipeline.
//!
//! Fingerprints the history, characterizes the series, scores and back-tests
//! the model panel, projects the forecast with the winner's error band, and
//! maps each forecast day's charge/discharge windows.

use crate::arbitrage::detect_windows;
use crate::error::EngineError;
use crate::fingerprint::dataset_fingerprint;
use crate::forecast::synthesize;
use crate::model::point::MarketPoint;
use crate::model::simulation::{DatasetCharacteristics, ModelResult, SimulationResult};
use crate::panel::backtest::run_backtest;
use crate::panel::{score_panel, MODEL_PANEL};
use crate::rng::SeededRng;
use crate::stats::series_stats;

/// Runs the whole pipeline over `history`, projecting `forecast_days` days
/// of 15-minute blocks at the given confidence level (percent).
///
/// The result is a pure function of the inputs: the same history, horizon
/// and level reproduce every predicted price bit for bit.
pub fn simulate(
    history: &[MarketPoint],
    forecast_days: u32,
    confidence_level: u32,
) -> Result<SimulationResult, EngineError> {
    if forecast_days == 0 {
        return Err(EngineError::InvalidForecastDays { got: forecast_days });
    }
    let seed = dataset_fingerprint(history).ok_or(EngineError::EmptyHistory)?;

    let prices: Vec<f64> = history.iter().map(|p| p.price_kwh).collect();
    let stats = series_stats(&prices);
    tracing::info!(
        seed,
        blocks = history.len(),
        volatility = stats.volatility,
        "Characterized price history"
    );

    // One shared generator scores the whole panel, so each model's jitter
    // depends only on the dataset seed and its panel position.
    let mut rng = SeededRng::new(seed);
    let penalties = score_panel(&stats, &mut rng);

    let model_results: Vec<ModelResult> = MODEL_PANEL
        .iter()
        .zip(penalties)
        .map(|(spec, penalty)| run_backtest(history, spec, penalty, seed))
        .collect();

    let best = select_best(&model_results);
    let best_model_name = best.name.clone();
    let winner_rmse = best.metrics.rmse;
    tracing::info!(model = %best_model_name, rmse = winner_rmse, "Selected back-test winner");

    let forecasts = synthesize(
        history,
        &stats,
        seed,
        winner_rmse,
        forecast_days,
        confidence_level,
    );
    let arbitrage_days = detect_windows(&forecasts);
    tracing::info!(
        forecast_blocks = forecasts.len(),
        days = arbitrage_days.len(),
        "Forecast and arbitrage windows ready"
    );

    Ok(SimulationResult {
        history: history.to_vec(),
        model_results,
        best_model_name,
        forecasts,
        arbitrage_days,
        characteristics: DatasetCharacteristics {
            volatility: stats.volatility,
            trend: stats.slope,
            length: history.len(),
        },
    })
}

/// Lowest back-test RMSE wins; earlier panel position breaks ties.
/// Callers guarantee `results` is non-empty.
fn select_best(results: &[ModelResult]) -> &ModelResult {
    let mut best = &results[0];
    for candidate in &results[1..] {
        if candidate.metrics.rmse < best.metrics.rmse {
            best = candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::metrics::ModelMetrics;

    fn result_with_rmse(name: &str, rmse: f64) -> ModelResult {
        ModelResult {
            name: name.to_string(),
            predicted: Vec::new(),
            abs_errors: Vec::new(),
            metrics: ModelMetrics {
                rmse,
                mae: 0.0,
                mape: 0.0,
                r2: 0.0,
                directional_accuracy: 0.0,
            },
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn lowest_rmse_wins() {
        let results = vec![
            result_with_rmse("a", 0.4),
            result_with_rmse("b", 0.1),
            result_with_rmse("c", 0.2),
        ];
        assert_eq!(select_best(&results).name, "b");
    }

    #[test]
    fn first_entry_wins_ties() {
        let results = vec![
            result_with_rmse("a", 0.3),
            result_with_rmse("b", 0.3),
            result_with_rmse("c", 0.3),
        ];
        assert_eq!(select_best(&results).name, "a");
    }
}
