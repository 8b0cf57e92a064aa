use serde::Serialize;

use crate::model::arbitrage::ArbitrageDay;
use crate::model::forecast::ForecastPoint;
use crate::model::metrics::ModelMetrics;
use crate::model::point::MarketPoint;

/// Synthetic back-test output for one panel model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResult {
    pub name: String,
    /// Predicted price per historical block, same length and order as the input.
    pub predicted: Vec<f64>,
    pub abs_errors: Vec<f64>,
    pub metrics: ModelMetrics,
    pub color: String,
}

/// Dataset-level characteristics echoed alongside the results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetCharacteristics {
    pub volatility: f64,
    pub trend: f64,
    pub length: usize,
}

/// Complete output of one simulation run. Immutable once assembled.
///
/// `model_results` holds exactly one entry per panel model, in panel order,
/// so serialization and tie-breaks stay deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub history: Vec<MarketPoint>,
    pub model_results: Vec<ModelResult>,
    pub best_model_name: String,
    pub forecasts: Vec<ForecastPoint>,
    pub arbitrage_days: Vec<ArbitrageDay>,
    pub characteristics: DatasetCharacteristics,
}

impl SimulationResult {
    /// Look up one model's back-test output by its panel name.
    pub fn model_result(&self, name: &str) -> Option<&ModelResult> {
        self.model_results.iter().find(|m| m.name == name)
    }

    /// The winning model's result; present by construction.
    pub fn best_model(&self) -> Option<&ModelResult> {
        self.model_result(&self.best_model_name)
    }
}
