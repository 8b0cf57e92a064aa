use serde::Serialize;

/// Summary statistics of a price series, with block index as the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    /// Coefficient of variation: std_dev / mean, 0 when the mean is 0.
    pub volatility: f64,
    /// Least-squares slope of price against block index.
    pub slope: f64,
    /// |slope| x 1000, the scale the model heuristics are tuned to.
    pub trend_strength: f64,
    pub len: usize,
}

/// Compute mean, spread and trend of a series. Total for any input: the
/// empty series yields all zeros, zero denominators substitute neutral
/// values instead of failing.
pub fn series_stats(prices: &[f64]) -> SeriesStats {
    let n = prices.len();
    let nf = n as f64;
    let sum: f64 = prices.iter().sum();
    let mean = sum / if n == 0 { 1.0 } else { nf };
    let std_dev = population_std_dev(prices);
    let volatility = if mean == 0.0 { 0.0 } else { std_dev / mean };

    // Closed-form least squares over x = 0..n-1.
    let x_sum = nf * (nf - 1.0) / 2.0;
    let x_sq_sum = nf * (nf - 1.0) * (2.0 * nf - 1.0) / 6.0;
    let xy_sum: f64 = prices.iter().enumerate().map(|(i, p)| i as f64 * p).sum();
    let denom = nf * x_sq_sum - x_sum * x_sum;
    let slope = (nf * xy_sum - x_sum * sum) / if denom == 0.0 { 1.0 } else { denom };

    SeriesStats {
        mean,
        std_dev,
        volatility,
        slope,
        trend_strength: slope.abs() * 1000.0,
        len: n,
    }
}

/// Population standard deviation; 0 for an empty series.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
