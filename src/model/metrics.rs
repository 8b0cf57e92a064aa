use serde::Serialize;

/// Back-test accuracy summary for one candidate model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModelMetrics {
    pub rmse: f64,
    pub mae: f64,
    /// Mean absolute percentage error; zero-priced blocks contribute nothing
    /// to the numerator but stay in the denominator.
    pub mape: f64,
    pub r2: f64,
    /// Share of consecutive pairs where the predicted move matches the
    /// actual move's direction, in percent.
    pub directional_accuracy: f64,
}
