use serde::Serialize;
use std::fmt;

/// Dispatch classification of a block run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WindowKind {
    Charge,
    Discharge,
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowKind::Charge => write!(f, "CHARGE"),
            WindowKind::Discharge => write!(f, "DISCHARGE"),
        }
    }
}

/// A maximal contiguous run of identically classified blocks. Never spans
/// two calendar days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageWindow {
    pub start_time: String,
    pub end_time: String,
    pub kind: WindowKind,
    pub avg_price: f64,
}

/// One forecast day's dispatch windows and the thresholds that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitrageDay {
    pub day_label: String,
    pub windows: Vec<ArbitrageWindow>,
    pub daily_min: f64,
    pub daily_max: f64,
    pub charge_threshold: f64,
    pub discharge_threshold: f64,
}
