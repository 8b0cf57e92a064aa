//! Intraday charge/discharge window detection over forecast blocks.
//!
//! Each forecast day is ranked on its own price curve: the cheapest decile
//! of blocks is eligible for charging, the most expensive decile for
//! discharging, and consecutive eligible blocks merge into windows.

use crate::model::arbitrage::{ArbitrageDay, ArbitrageWindow, WindowKind};
use crate::model::forecast::ForecastPoint;

/// Fraction of the sorted daily curve treated as cheap enough to charge.
const CHARGE_QUANTILE: f64 = 0.10;
/// Fraction of the sorted daily curve above which blocks discharge.
const DISCHARGE_QUANTILE: f64 = 0.90;

/// A window under construction while scanning a day's blocks in order.
struct OpenWindow {
    kind: WindowKind,
    start_time: String,
    end_time: String,
    price_sum: f64,
    blocks: usize,
}

impl OpenWindow {
    fn begin(kind: WindowKind, block: &ForecastPoint) -> Self {
        Self {
            kind,
            start_time: block.time_block.clone(),
            end_time: block.time_block.clone(),
            price_sum: block.predicted_price,
            blocks: 1,
        }
    }

    fn extend(&mut self, block: &ForecastPoint) {
        self.end_time = block.time_block.clone();
        self.price_sum += block.predicted_price;
        self.blocks += 1;
    }

    fn into_window(self) -> ArbitrageWindow {
        ArbitrageWindow {
            start_time: self.start_time,
            end_time: self.end_time,
            kind: self.kind,
            avg_price: self.price_sum / self.blocks as f64,
        }
    }
}

/// Splits the forecast into consecutive same-day runs and detects the
/// charge/discharge windows of each day independently.
pub fn detect_windows(forecasts: &[ForecastPoint]) -> Vec<ArbitrageDay> {
    let mut days = Vec::new();
    let mut start = 0;
    while start < forecasts.len() {
        let label = &forecasts[start].day_label;
        let mut end = start + 1;
        while end < forecasts.len() && forecasts[end].day_label == *label {
            end += 1;
        }
        days.push(detect_day(&forecasts[start..end]));
        start = end;
    }
    days
}

/// Ranks one day's blocks and merges threshold crossings into windows.
/// Callers guarantee `blocks` is non-empty.
fn detect_day(blocks: &[ForecastPoint]) -> ArbitrageDay {
    let mut sorted: Vec<f64> = blocks.iter().map(|b| b.predicted_price).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    let charge_threshold = sorted[(n as f64 * CHARGE_QUANTILE).floor() as usize];
    let discharge_threshold = sorted[(n as f64 * DISCHARGE_QUANTILE).floor() as usize];

    let mut windows = Vec::new();
    let mut open: Option<OpenWindow> = None;
    for block in blocks {
        // On a flat day both thresholds collapse onto the same price and
        // the cheap side wins the tie, so every block reads as chargeable.
        let kind = if block.predicted_price <= charge_threshold {
            Some(WindowKind::Charge)
        } else if block.predicted_price >= discharge_threshold {
            Some(WindowKind::Discharge)
        } else {
            None
        };
        match kind {
            None => {
                if let Some(done) = open.take() {
                    windows.push(done.into_window());
                }
            }
            Some(k) => match open.as_mut() {
                Some(w) if w.kind == k => w.extend(block),
                _ => {
                    if let Some(done) = open.take() {
                        windows.push(done.into_window());
                    }
                    open = Some(OpenWindow::begin(k, block));
                }
            },
        }
    }
    if let Some(done) = open.take() {
        windows.push(done.into_window());
    }

    ArbitrageDay {
        day_label: blocks[0].day_label.clone(),
        windows,
        daily_min: sorted[0],
        daily_max: sorted[n - 1],
        charge_threshold,
        discharge_threshold,
    }
}
