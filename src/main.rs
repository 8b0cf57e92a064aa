use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use spotsim::bess::{self, BessConfig, BessReport};
use spotsim::config::Config;
use spotsim::engine;
use spotsim::export;
use spotsim::ingest;
use spotsim::model::simulation::SimulationResult;

#[derive(Parser)]
#[command(name = "spotsim")]
#[command(about = "Day-ahead power price simulation and battery arbitrage", version)]
struct Cli {
    /// TOML configuration file (falls back to config/default.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Back-test the model panel and forecast prices with arbitrage windows.
    Run(RunArgs),
    /// Size a battery system against the forecast price spread.
    Bess(BessArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Market CSV export to load.
    input: PathBuf,

    /// Forecast horizon in days.
    #[arg(long)]
    days: Option<u32>,

    /// Confidence level in percent (90, 95 or 99).
    #[arg(long)]
    confidence: Option<u32>,

    /// Report destination.
    #[arg(long, value_enum, default_value_t = OutputMode::Table)]
    output: OutputMode,

    /// Forecast CSV path (defaults to forecast_<model>_<date>.csv).
    #[arg(long)]
    csv_path: Option<PathBuf>,

    /// Also dump the whole result as pretty JSON.
    #[arg(long)]
    json_path: Option<PathBuf>,
}

#[derive(Args)]
struct BessArgs {
    /// Market CSV export to load.
    input: PathBuf,

    /// Forecast horizon in days.
    #[arg(long)]
    days: Option<u32>,

    /// System capacity in MW.
    #[arg(long)]
    capacity_mw: Option<f64>,

    /// Discharge duration in hours.
    #[arg(long)]
    duration_hours: Option<f64>,

    /// Charge/discharge cycles per day.
    #[arg(long)]
    cycles: Option<f64>,

    /// Round-trip efficiency (0..=1).
    #[arg(long)]
    efficiency: Option<f64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Table,
    Csv,
    Both,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);

    match cli.command {
        Command::Run(args) => run(args, &config),
        Command::Bess(args) => size_battery(args, &config),
    }
}

/// Logs go to stderr so stdout stays a clean report.
fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: RunArgs, config: &Config) -> Result<()> {
    let history = ingest::load_history_csv(&args.input)?;
    let days = args.days.unwrap_or(config.simulation.forecast_days);
    let confidence = args
        .confidence
        .unwrap_or(config.simulation.confidence_level);

    let result = engine::simulate(&history, days, confidence)?;

    if args.output != OutputMode::Csv {
        print_report(&result, confidence);
    }
    if args.output != OutputMode::Table {
        let first_day = result
            .forecasts
            .first()
            .map(|f| f.date)
            .context("forecast is empty")?;
        let path = args.csv_path.unwrap_or_else(|| {
            PathBuf::from(export::default_forecast_name(
                &result.best_model_name,
                first_day,
            ))
        });
        export::write_forecast_csv(&path, &result.forecasts, &result.best_model_name)?;
        println!("forecast written to {}", path.display());
    }
    if let Some(path) = args.json_path {
        export::write_result_json(&path, &result)?;
        println!("result written to {}", path.display());
    }
    Ok(())
}

fn size_battery(args: BessArgs, config: &Config) -> Result<()> {
    let history = ingest::load_history_csv(&args.input)?;
    let days = args.days.unwrap_or(config.simulation.forecast_days);
    let result = engine::simulate(&history, days, config.simulation.confidence_level)?;

    let mut bess_config = config.bess;
    if let Some(capacity) = args.capacity_mw {
        bess_config.capacity_mw = capacity;
    }
    if let Some(duration) = args.duration_hours {
        bess_config.duration_hours = duration;
    }
    if let Some(cycles) = args.cycles {
        bess_config.cycles_per_day = cycles;
    }
    if let Some(efficiency) = args.efficiency {
        bess_config.efficiency = efficiency;
    }

    let report = bess::evaluate(&result.forecasts, &bess_config)?;
    print_bess_report(&report, &bess_config, &result.best_model_name);
    Ok(())
}

fn print_report(result: &SimulationResult, confidence: u32) {
    println!("price simulation report");
    println!("=======================");
    if let (Some(first), Some(last)) = (result.history.first(), result.history.last()) {
        println!(
            "dataset    : {} blocks from {} to {}",
            result.characteristics.length, first.date_label, last.date_label
        );
    }
    println!(
        "volatility : {:.4}   trend: {:+.6}/block",
        result.characteristics.volatility, result.characteristics.trend
    );
    println!();

    println!("model back-test");
    println!("---------------");
    for model in &result.model_results {
        println!(
            "- {:<14} rmse {:>8.4}  mae {:>8.4}  mape {:>6.2}%  r2 {:>7.4}  dir {:>5.1}%",
            model.name,
            model.metrics.rmse,
            model.metrics.mae,
            model.metrics.mape,
            model.metrics.r2,
            model.metrics.directional_accuracy
        );
    }
    println!("best model : {}", result.best_model_name);
    println!();

    println!(
        "forecast ({} days x 96 blocks, {}% confidence)",
        result.arbitrage_days.len(),
        confidence
    );
    println!("----------------------------------------------");
    for day in &result.arbitrage_days {
        println!(
            "- {}  min {:.4}  max {:.4}  charge<={:.4}  discharge>={:.4}",
            day.day_label, day.daily_min, day.daily_max, day.charge_threshold, day.discharge_threshold
        );
        if day.windows.is_empty() {
            println!("    no dispatch windows");
        }
        for window in &day.windows {
            println!(
                "    {:<10} {} - {}  avg {:.4}",
                window.kind, window.start_time, window.end_time, window.avg_price
            );
        }
    }
}

fn print_bess_report(report: &BessReport, config: &BessConfig, model_name: &str) {
    println!("battery dispatch report ({} forecast)", model_name);
    println!("=====================================");
    println!(
        "system     : {} MW x {} h, {} cycles/day, {:.0}% round trip",
        config.capacity_mw,
        config.duration_hours,
        config.cycles_per_day,
        config.efficiency * 100.0
    );
    println!();
    for day in &report.days {
        println!(
            "- {}  buy {:>8.4}  sell {:>8.4}  net {:>14.2}",
            day.day_label, day.avg_buy_price, day.avg_sell_price, day.net_profit
        );
    }
    println!();
    let m = &report.metrics;
    println!("daily net    : {:>16.2}", m.daily_revenue);
    println!("weekly net   : {:>16.2}", m.weekly_revenue);
    println!("annual net   : {:>16.2}", m.net_profit);
    println!("annual opex  : {:>16.2}", m.annual_opex);
    println!("roi          : {:.2}%", m.roi);
    println!("payback      : {:.1} years", m.payback_years);
    println!("npv (5y)     : {:>16.2}", m.npv);
}
