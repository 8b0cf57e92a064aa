use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// One cleared 15-minute block of day-ahead market data.
///
/// Prices are market clearing prices in currency per kWh; the label fields
/// carry the exchange-export formats (`DD-MM-YYYY`, `HH:MM`) used everywhere
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPoint {
    pub timestamp: NaiveDateTime,
    pub date_label: String,
    pub time_block: String,
    pub price_kwh: f64,
    pub hour: u32,
    pub minute: u32,
    pub day_of_week: Weekday,
    pub is_weekend: bool,
}

impl MarketPoint {
    /// Build the point for the block starting at `hour:minute` on `date`.
    pub fn from_block(date: NaiveDate, hour: u32, minute: u32, price_kwh: f64) -> Self {
        assert!(hour < 24, "hour must be < 24");
        assert!(minute < 60, "minute must be < 60");
        let timestamp = date.and_hms_opt(hour, minute, 0).unwrap(); // in range, asserted above
        let day_of_week = date.weekday();
        Self {
            timestamp,
            date_label: date.format("%d-%m-%Y").to_string(),
            time_block: format!("{:02}:{:02}", hour, minute),
            price_kwh,
            hour,
            minute,
            day_of_week,
            is_weekend: matches!(day_of_week, Weekday::Sat | Weekday::Sun),
        }
    }
}
