pub mod backtest;

use serde::Serialize;

use crate::rng::SeededRng;
use crate::stats::SeriesStats;

/// Family a candidate model belongs to, for presentation grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelCategory {
    Statistical,
    Ensemble,
    Boosting,
    DeepLearning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Sarimax,
    RandomForest,
    XgBoost,
    LightGbm,
    CatBoost,
    Lstm,
}

/// One row of the fixed candidate-model table.
#[derive(Debug, Clone, Copy)]
pub struct ModelSpec {
    pub kind: ModelKind,
    pub name: &'static str,
    pub color: &'static str,
    pub category: ModelCategory,
}

/// The fixed panel. Order is part of the contract: seeded jitter is drawn
/// per model in this order, and RMSE ties resolve to the earliest entry.
pub const MODEL_PANEL: [ModelSpec; 6] = [
    ModelSpec {
        kind: ModelKind::Sarimax,
        name: "SARIMAX",
        color: "#3b82f6",
        category: ModelCategory::Statistical,
    },
    ModelSpec {
        kind: ModelKind::RandomForest,
        name: "Random Forest",
        color: "#10b981",
        category: ModelCategory::Ensemble,
    },
    ModelSpec {
        kind: ModelKind::XgBoost,
        name: "XGBoost",
        color: "#f59e0b",
        category: ModelCategory::Boosting,
    },
    ModelSpec {
        kind: ModelKind::LightGbm,
        name: "LightGBM",
        color: "#8b5cf6",
        category: ModelCategory::Boosting,
    },
    ModelSpec {
        kind: ModelKind::CatBoost,
        name: "CatBoost",
        color: "#ec4899",
        category: ModelCategory::Boosting,
    },
    ModelSpec {
        kind: ModelKind::Lstm,
        name: "LSTM",
        color: "#ef4444",
        category: ModelCategory::DeepLearning,
    },
];

/// Error level every model starts from before heuristics and jitter.
pub const BASE_ERROR: f64 = 0.04;

/// Penalties never drop below this, whatever the jitter draw.
pub const MIN_PENALTY: f64 = 0.005;

/// Heuristic error penalty for one model before jitter. Each model has its
/// own hard-coded affinity for volatility, trend strength and series length.
pub fn heuristic_penalty(kind: ModelKind, stats: &SeriesStats) -> f64 {
    let mut penalty = BASE_ERROR;
    match kind {
        ModelKind::Sarimax => {
            if stats.volatility < 0.15 {
                penalty -= 0.01;
            }
            if stats.trend_strength < 0.05 {
                penalty -= 0.005;
            }
        }
        ModelKind::RandomForest => {
            if stats.volatility > 0.25 {
                penalty -= 0.01;
            }
            if stats.len > 1000 {
                penalty -= 0.005;
            }
        }
        ModelKind::XgBoost => {
            if stats.trend_strength > 0.05 {
                penalty -= 0.01;
            }
            penalty -= 0.002;
        }
        ModelKind::LightGbm => {
            if stats.len > 2000 {
                penalty -= 0.01;
            }
        }
        ModelKind::CatBoost => {
            if stats.volatility > 0.3 {
                penalty -= 0.01;
            }
        }
        ModelKind::Lstm => {
            if stats.len > 5000 {
                penalty -= 0.015;
            }
            if stats.volatility > 0.2 {
                penalty -= 0.005;
            }
            if stats.len < 500 {
                penalty += 0.02;
            }
        }
    }
    penalty
}

/// Penalties for the whole panel: one jitter draw per model, in panel order,
/// from the run's global generator, floored at the minimum penalty.
pub fn score_panel(stats: &SeriesStats, rng: &mut SeededRng) -> [f64; 6] {
    let mut penalties = [0.0; 6];
    for (slot, spec) in penalties.iter_mut().zip(MODEL_PANEL.iter()) {
        let jitter = (rng.next_f64() - 0.5) * 0.04;
        *slot = (heuristic_penalty(spec.kind, stats) + jitter).max(MIN_PENALTY);
    }
    penalties
}
