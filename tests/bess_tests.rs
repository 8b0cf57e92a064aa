use chrono::{Duration, NaiveDate};
use spotsim::bess::{evaluate, BessConfig};
use spotsim::engine::simulate;
use spotsim::model::point::MarketPoint;

/// Same exact-binary-fraction history the engine tests replay.
fn two_day_history() -> Vec<MarketPoint> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut points = Vec::new();
    for day in 0..2u32 {
        let date = start + Duration::days(i64::from(day));
        for hour in 0..24u32 {
            for quarter in 0..4u32 {
                let base = 4.0 + 0.25 * f64::from(hour);
                let mut price = if (18..=21).contains(&hour) {
                    base + 2.5
                } else if hour <= 5 {
                    base - 1.0
                } else {
                    base
                };
                price += 0.125 * f64::from(quarter);
                price += f64::from(day) * 0.5;
                points.push(MarketPoint::from_block(date, hour, quarter * 15, price));
            }
        }
    }
    points
}

#[test]
fn default_system_economics_match_the_recorded_run() {
    let history = two_day_history();
    let result = simulate(&history, 7, 95).unwrap();
    let report = evaluate(&result.forecasts, &BessConfig::default()).unwrap();

    assert_eq!(report.days.len(), 7);
    assert_eq!(report.days[0].day_label, "03-01-2024");
    assert_eq!(report.days[6].day_label, "09-01-2024");
    assert!((report.days[0].net_profit - 466689.1185897816).abs() < 1e-6);

    let m = &report.metrics;
    assert!((m.daily_revenue - 450023.4880448415).abs() < 1e-6);
    assert!((m.annual_revenue - 164258573.13636714).abs() < 1e-4);
    assert!((m.annual_opex - 18_250_000.0).abs() < 1e-6);
    assert!((m.roi - 6.570342925454686).abs() < 1e-9);
    assert!((m.payback_years - 15.21990573925481).abs() < 1e-9);
    assert!((m.npv + 1678707134.3181643).abs() < 1e-3);
}

#[test]
fn sell_side_always_clears_at_or_above_the_buy_side() {
    let history = two_day_history();
    let result = simulate(&history, 7, 95).unwrap();
    let report = evaluate(&result.forecasts, &BessConfig::default()).unwrap();
    for day in &report.days {
        assert!(day.avg_sell_price >= day.avg_buy_price);
    }
}

#[test]
fn higher_round_trip_efficiency_earns_more() {
    let history = two_day_history();
    let result = simulate(&history, 7, 95).unwrap();

    let baseline = evaluate(&result.forecasts, &BessConfig::default()).unwrap();
    let lossless = BessConfig {
        efficiency: 1.0,
        ..BessConfig::default()
    };
    let better = evaluate(&result.forecasts, &lossless).unwrap();
    assert!(better.metrics.net_profit > baseline.metrics.net_profit);
}
