use crate::fingerprint;
use crate::model::metrics::ModelMetrics;
use crate::model::point::MarketPoint;
use crate::model::simulation::ModelResult;
use crate::panel::ModelSpec;
use crate::rng::SeededRng;

/// Peak-hour blocks are harder to predict than the overnight base.
fn difficulty_multiplier(hour: u32) -> f64 {
    if (18..=22).contains(&hour) {
        1.25
    } else if (7..=10).contains(&hour) {
        1.10
    } else {
        1.0
    }
}

/// Replay the history through one model's synthetic error process.
///
/// The model's generator is seeded from the dataset seed and the model name,
/// and advances exactly once per block, so the predicted series is a pure
/// function of (dataset, model, penalty).
pub fn run_backtest(
    history: &[MarketPoint],
    spec: &ModelSpec,
    penalty: f64,
    dataset_seed: u32,
) -> ModelResult {
    let mut rng = SeededRng::new(fingerprint::model_seed(dataset_seed, spec.name));
    let mut predicted = Vec::with_capacity(history.len());
    let mut abs_errors = Vec::with_capacity(history.len());

    for point in history {
        let noise = (rng.next_f64() - 0.5) * 2.0;
        let relative_error = penalty * difficulty_multiplier(point.hour) * noise;
        let prediction = (point.price_kwh + point.price_kwh * relative_error).max(0.0);
        abs_errors.push((point.price_kwh - prediction).abs());
        predicted.push(prediction);
    }

    let actuals: Vec<f64> = history.iter().map(|p| p.price_kwh).collect();
    let metrics = accuracy_metrics(&actuals, &predicted);

    ModelResult {
        name: spec.name.to_string(),
        predicted,
        abs_errors,
        metrics,
        color: spec.color.to_string(),
    }
}

/// Accuracy metrics of a prediction series against its actuals. Total:
/// zero variance, zero prices and single-point series all yield neutral
/// values instead of failing.
pub fn accuracy_metrics(actuals: &[f64], predictions: &[f64]) -> ModelMetrics {
    if actuals.is_empty() {
        return ModelMetrics {
            rmse: 0.0,
            mae: 0.0,
            mape: 0.0,
            r2: 0.0,
            directional_accuracy: 0.0,
        };
    }
    let n = actuals.len() as f64;

    let mut sq_sum = 0.0;
    let mut abs_sum = 0.0;
    let mut pct_sum = 0.0;
    for (actual, prediction) in actuals.iter().zip(predictions) {
        let err = (actual - prediction).abs();
        sq_sum += err * err;
        abs_sum += err;
        if *actual != 0.0 {
            pct_sum += (err / actual).abs();
        }
    }

    let mean_actual = actuals.iter().sum::<f64>() / n;
    let ss_tot: f64 = actuals.iter().map(|a| (a - mean_actual).powi(2)).sum();
    let r2 = if ss_tot == 0.0 { 0.0 } else { 1.0 - sq_sum / ss_tot };

    let mut correct = 0u32;
    let mut checks = 0u32;
    for i in 1..actuals.len() {
        let actual_diff = actuals[i] - actuals[i - 1];
        let pred_diff = predictions[i] - actuals[i - 1];
        if (actual_diff > 0.0 && pred_diff > 0.0)
            || (actual_diff < 0.0 && pred_diff < 0.0)
            || (actual_diff == 0.0 && pred_diff == 0.0)
        {
            correct += 1;
        }
        checks += 1;
    }
    let directional_accuracy = if checks > 0 {
        f64::from(correct) / f64::from(checks) * 100.0
    } else {
        0.0
    };

    ModelMetrics {
        rmse: (sq_sum / n).sqrt(),
        mae: abs_sum / n,
        mape: pct_sum / n * 100.0,
        r2,
        directional_accuracy,
    }
}
