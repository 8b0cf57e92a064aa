//! Battery energy storage dispatch and financial projection.
//!
//! A naive daily optimizer: charge through the cheapest forecast blocks,
//! discharge through the most expensive ones, and annualize the spread.
//! Sequencing constraints are deliberately ignored; the answer is a sizing
//! estimate, not a dispatch schedule.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::model::forecast::ForecastPoint;

/// Battery system parameters. Forecast prices are per kWh, so capex is
/// quoted per kWh and opex per MWh of throughput, utility convention.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BessConfig {
    pub capacity_mw: f64,
    pub duration_hours: f64,
    pub cycles_per_day: f64,
    /// Round-trip efficiency applied to discharge revenue.
    pub efficiency: f64,
    pub depth_of_discharge: f64,
    pub capex_per_kwh: f64,
    pub opex_per_mwh: f64,
}

impl Default for BessConfig {
    fn default() -> Self {
        Self {
            capacity_mw: 50.0,
            duration_hours: 2.0,
            cycles_per_day: 1.0,
            efficiency: 0.90,
            depth_of_discharge: 0.9,
            capex_per_kwh: 25_000.0,
            opex_per_mwh: 500.0,
        }
    }
}

impl BessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity_mw <= 0.0 {
            bail!("capacity_mw must be > 0 (got {})", self.capacity_mw);
        }
        if self.duration_hours <= 0.0 {
            bail!("duration_hours must be > 0 (got {})", self.duration_hours);
        }
        if self.cycles_per_day <= 0.0 {
            bail!("cycles_per_day must be > 0 (got {})", self.cycles_per_day);
        }
        if !(0.0..=1.0).contains(&self.efficiency) {
            bail!("efficiency must be within 0..=1 (got {})", self.efficiency);
        }
        if !(0.0..=1.0).contains(&self.depth_of_discharge) {
            bail!(
                "depth_of_discharge must be within 0..=1 (got {})",
                self.depth_of_discharge
            );
        }
        if self.capex_per_kwh < 0.0 {
            bail!("capex_per_kwh must be >= 0 (got {})", self.capex_per_kwh);
        }
        if self.opex_per_mwh < 0.0 {
            bail!("opex_per_mwh must be >= 0 (got {})", self.opex_per_mwh);
        }
        Ok(())
    }

    /// 15-minute blocks charged (and discharged) per day.
    fn blocks_per_day(&self) -> usize {
        (self.duration_hours * 4.0 * self.cycles_per_day) as usize
    }

    /// Daily energy throughput in MWh.
    fn daily_energy_mwh(&self) -> f64 {
        self.capacity_mw * self.duration_hours * self.depth_of_discharge * self.cycles_per_day
    }

    /// Installed storage capital cost.
    fn total_capex(&self) -> f64 {
        self.capacity_mw * 1000.0 * self.duration_hours * self.capex_per_kwh
    }
}

/// One forecast day's dispatch outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDispatch {
    pub day_label: String,
    pub avg_buy_price: f64,
    pub avg_sell_price: f64,
    pub net_profit: f64,
}

/// Annualized economics of the configured system over the forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialMetrics {
    pub daily_revenue: f64,
    pub weekly_revenue: f64,
    pub annual_revenue: f64,
    pub annual_opex: f64,
    /// Annual net profit; daily figures already carry the throughput opex.
    pub net_profit: f64,
    pub roi: f64,
    pub payback_years: f64,
    /// Five-year horizon, no discounting.
    pub npv: f64,
}

/// Per-day dispatch ledger plus the annualized financials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BessReport {
    pub days: Vec<DailyDispatch>,
    pub metrics: FinancialMetrics,
}

/// Evaluates the naive arbitrage dispatch over the forecast horizon.
pub fn evaluate(forecasts: &[ForecastPoint], config: &BessConfig) -> Result<BessReport> {
    config.validate()?;
    if forecasts.is_empty() {
        bail!("no forecast blocks to dispatch against");
    }

    let mut days = Vec::new();
    let mut total_net = 0.0;
    let mut start = 0;
    while start < forecasts.len() {
        let label = &forecasts[start].day_label;
        let mut end = start + 1;
        while end < forecasts.len() && forecasts[end].day_label == *label {
            end += 1;
        }
        let day = dispatch_day(&forecasts[start..end], config);
        total_net += day.net_profit;
        days.push(day);
        start = end;
    }

    let days_projected = days.len() as f64;
    let daily_revenue = total_net / days_projected;
    let annual_revenue = daily_revenue * 365.0;
    let annual_net_profit = annual_revenue;

    let total_capex = config.total_capex();
    let annual_opex = config.capacity_mw
        * config.duration_hours
        * config.cycles_per_day
        * 365.0
        * config.opex_per_mwh;
    let roi = annual_net_profit / total_capex * 100.0;
    let payback_denominator = if annual_net_profit == 0.0 {
        1.0
    } else {
        annual_net_profit
    };

    Ok(BessReport {
        days,
        metrics: FinancialMetrics {
            daily_revenue,
            weekly_revenue: daily_revenue * 7.0,
            annual_revenue,
            annual_opex,
            net_profit: annual_net_profit,
            roi,
            payback_years: total_capex / payback_denominator,
            npv: -total_capex + annual_net_profit * 5.0,
        },
    })
}

/// Buys the cheapest blocks of the day and sells the most expensive ones.
/// Callers guarantee `blocks` is non-empty.
fn dispatch_day(blocks: &[ForecastPoint], config: &BessConfig) -> DailyDispatch {
    let mut sorted: Vec<f64> = blocks.iter().map(|b| b.predicted_price).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Short days cap the dispatch; fractional sub-block setups still move
    // at least one block.
    let take = config.blocks_per_day().min(sorted.len()).max(1);
    let avg_buy_price = sorted[..take].iter().sum::<f64>() / take as f64;
    let avg_sell_price = sorted[sorted.len() - take..].iter().sum::<f64>() / take as f64;

    let energy = config.daily_energy_mwh();
    // Prices are per kWh; scale by 1000 to price the MWh throughput.
    let cost_to_charge = avg_buy_price * 1000.0 * energy;
    let revenue_from_discharge = avg_sell_price * 1000.0 * energy * config.efficiency;
    let gross_profit = revenue_from_discharge - cost_to_charge;
    let operational_cost = energy * config.opex_per_mwh;

    DailyDispatch {
        day_label: blocks[0].day_label.clone(),
        avg_buy_price,
        avg_sell_price,
        net_profit: gross_profit - operational_cost,
    }
}
