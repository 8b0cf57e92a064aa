use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::bess::BessConfig;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub bess: BessConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Forecast horizon in whole days of 96 blocks.
    pub forecast_days: u32,
    /// Confidence level for the interval band, in percent.
    pub confidence_level: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            forecast_days: 7,
            confidence_level: 95,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration in layers: the TOML file when present, then
    /// `SPOTSIM_*` environment overrides on top.
    ///
    /// An explicit `path` must exist; without one, `config/default.toml`
    /// is used if available and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new("config/default.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        if let Ok(days) = std::env::var("SPOTSIM_FORECAST_DAYS") {
            config.simulation.forecast_days = days
                .parse()
                .context("SPOTSIM_FORECAST_DAYS must be a positive integer")?;
        }
        if let Ok(confidence) = std::env::var("SPOTSIM_CONFIDENCE") {
            config.simulation.confidence_level = confidence
                .parse()
                .context("SPOTSIM_CONFIDENCE must be an integer percentage")?;
        }
        if let Ok(level) = std::env::var("SPOTSIM_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.simulation.forecast_days == 0 {
            bail!("simulation.forecast_days must be >= 1");
        }
        self.bess
            .validate()
            .context("bess configuration is invalid")?;
        Ok(())
    }
}
