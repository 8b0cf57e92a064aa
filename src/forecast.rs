use chrono::{Datelike, Duration, Weekday};

use crate::fingerprint;
use crate::model::forecast::ForecastPoint;
use crate::model::point::MarketPoint;
use crate::rng::SeededRng;
use crate::stats::SeriesStats;

/// 15-minute blocks per calendar day.
pub const BLOCKS_PER_DAY: usize = 96;

/// z-score for the requested confidence level. Unsupported levels map to
/// the 95% default rather than erroring.
pub fn z_score(confidence_level: u32) -> f64 {
    match confidence_level {
        90 => 1.645,
        99 => 2.576,
        _ => 1.96,
    }
}

/// Synthesize future blocks from the dataset's mean, trend and the winning
/// model's error level.
///
/// Day `d` (1-indexed) lands on the last history date plus `d` days. Each
/// block draws exactly one value from the forecast generator, so the output
/// is a pure function of (dataset seed, stats, winner RMSE, days, level).
pub fn synthesize(
    history: &[MarketPoint],
    stats: &SeriesStats,
    dataset_seed: u32,
    winner_rmse: f64,
    forecast_days: u32,
    confidence_level: u32,
) -> Vec<ForecastPoint> {
    let Some(last) = history.last() else {
        return Vec::new();
    };
    let last_date = last.timestamp.date();
    let z = z_score(confidence_level);
    let mut rng = SeededRng::new(fingerprint::forecast_seed(dataset_seed));

    let mut forecasts = Vec::with_capacity(forecast_days as usize * BLOCKS_PER_DAY);
    for d in 1..=i64::from(forecast_days) {
        let date = last_date + Duration::days(d);
        let day_label = date.format("%d-%m-%Y").to_string();
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let uncertainty_growth = 1.0 + d as f64 * 0.05;
        let interval = winner_rmse * z * uncertainty_growth;

        for hour in 0..24u32 {
            for minute in [0u32, 15, 30, 45] {
                let mut base = stats.mean;
                if (6..10).contains(&hour) {
                    base *= 1.25;
                } else if (18..22).contains(&hour) {
                    base *= 1.4;
                } else if hour < 6 {
                    base *= 0.75;
                }
                base += stats.slope * (history.len() + forecasts.len()) as f64;
                if weekend {
                    base *= 0.92;
                }

                let variation = (rng.next_f64() - 0.5) * 0.12 * uncertainty_growth;
                let price = (base * (1.0 + variation)).max(0.0);

                forecasts.push(ForecastPoint {
                    date,
                    day_label: day_label.clone(),
                    time_block: format!("{:02}:{:02}", hour, minute),
                    predicted_price: price,
                    lower_bound: (price - interval).max(0.0),
                    upper_bound: price + interval,
                });
            }
        }
    }
    forecasts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::series_stats;
    use chrono::NaiveDate;

    fn one_day_history(price: f64) -> Vec<MarketPoint> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut points = Vec::new();
        for hour in 0..24 {
            for minute in [0, 15, 30, 45] {
                points.push(MarketPoint::from_block(date, hour, minute, price));
            }
        }
        points
    }

    #[test]
    fn z_scores_for_supported_levels() {
        assert!((z_score(90) - 1.645).abs() < f64::EPSILON);
        assert!((z_score(95) - 1.96).abs() < f64::EPSILON);
        assert!((z_score(99) - 2.576).abs() < f64::EPSILON);
    }

    #[test]
    fn unsupported_level_falls_back_to_95() {
        assert!((z_score(42) - 1.96).abs() < f64::EPSILON);
        assert!((z_score(0) - 1.96).abs() < f64::EPSILON);
    }

    #[test]
    fn one_day_yields_96_blocks_on_the_next_date() {
        let history = one_day_history(4.0);
        let stats = series_stats(&[4.0; 96]);
        let forecasts = synthesize(&history, &stats, 1000, 0.1, 1, 95);
        assert_eq!(forecasts.len(), BLOCKS_PER_DAY);
        assert!(forecasts.iter().all(|f| f.day_label == "02-01-2024"));
        assert_eq!(forecasts[0].time_block, "00:00");
        assert_eq!(forecasts[95].time_block, "23:45");
    }

    #[test]
    fn bounds_are_symmetric_until_the_floor_clips() {
        let history = one_day_history(4.0);
        let stats = series_stats(&[4.0; 96]);
        let forecasts = synthesize(&history, &stats, 1000, 0.1, 2, 95);
        for (i, f) in forecasts.iter().enumerate() {
            let d = (i / BLOCKS_PER_DAY + 1) as f64;
            let expected = 0.1 * 1.96 * (1.0 + d * 0.05);
            assert!((f.upper_bound - f.predicted_price - expected).abs() < 1e-12);
            if f.predicted_price >= expected {
                assert!((f.predicted_price - f.lower_bound - expected).abs() < 1e-12);
            } else {
                assert!(f.lower_bound.abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn prices_never_go_negative() {
        let history = one_day_history(0.001);
        let stats = series_stats(&[0.001; 96]);
        let forecasts = synthesize(&history, &stats, 7, 10.0, 7, 99);
        assert!(forecasts
            .iter()
            .all(|f| f.predicted_price >= 0.0 && f.lower_bound >= 0.0));
    }

    #[test]
    fn weekend_discount_enters_the_formula() {
        // History ends Friday 05-01-2024, so forecast day 1 is a Saturday.
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let history: Vec<MarketPoint> = (0..96)
            .map(|i| MarketPoint::from_block(date, (i / 4) as u32, (i % 4) as u32 * 15, 5.0))
            .collect();
        let stats = series_stats(&vec![5.0; 96]);
        let forecasts = synthesize(&history, &stats, 500, 0.0, 1, 95);
        assert_eq!(forecasts[0].day_label, "06-01-2024");

        // Replay the generator: flat series means zero slope, so each block
        // is band-scaled mean times the weekend factor plus bounded noise.
        let mut rng = SeededRng::new(fingerprint::forecast_seed(500));
        for (i, f) in forecasts.iter().enumerate() {
            let hour = (i / 4) as u32;
            let mut base = 5.0;
            if (6..10).contains(&hour) {
                base *= 1.25;
            } else if (18..22).contains(&hour) {
                base *= 1.4;
            } else if hour < 6 {
                base *= 0.75;
            }
            base *= 0.92;
            let variation = (rng.next_f64() - 0.5) * 0.12 * 1.05;
            let expected = (base * (1.0 + variation)).max(0.0);
            assert!(
                (f.predicted_price - expected).abs() < 1e-12,
                "block {}: {} vs {}",
                i,
                f.predicted_price,
                expected
            );
        }
    }

    #[test]
    fn deterministic_for_equal_inputs() {
        let history = one_day_history(3.5);
        let stats = series_stats(&vec![3.5; 96]);
        let a = synthesize(&history, &stats, 42, 0.2, 3, 90);
        let b = synthesize(&history, &stats, 42, 0.2, 3, 90);
        assert_eq!(a, b);
    }
}
