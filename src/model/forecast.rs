use chrono::NaiveDate;
use serde::Serialize;

/// One synthesized future block with its confidence band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub day_label: String,
    pub time_block: String,
    pub predicted_price: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}
