//! Configuration Loader
//!
//! Loads and validates forecast run configuration from TOML files.

use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::domain::TRADING_DAYS_PER_YEAR;
use crate::stochastic::MeanLevel;

/// Overrides `simulation.seed`
pub const SEED_ENV: &str = "WILCKE_SEED";
/// Overrides `simulation.path_count`
pub const PATH_COUNT_ENV: &str = "WILCKE_PATH_COUNT";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub model: ModelSection,
    pub forecast: ForecastSection,
    pub assets: Vec<AssetEntry>,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Monte Carlo grid and ensemble settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    /// Grid steps per simulated year (252 = daily trading steps)
    pub steps_per_year: u32,
    /// Paths per asset
    pub path_count: usize,
    /// Run seed; random when absent
    pub seed: Option<u64>,
    /// Raw paths copied into the report
    pub sample_paths: usize,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            steps_per_year: TRADING_DAYS_PER_YEAR as u32,
            path_count: 50,
            seed: None,
            sample_paths: 10,
        }
    }
}

impl SimulationSection {
    /// Step width in years
    pub fn step_size(&self) -> f64 {
        1.0 / self.steps_per_year as f64
    }
}

/// SDE model settings not estimated from data
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// Mean reversion speed
    pub theta: f64,
    /// Source of the long-run level `mu`
    pub mean_level: MeanLevel,
    /// Also simulate the GBM baseline
    pub include_baseline: bool,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            theta: 0.5,
            mean_level: MeanLevel::Drift,
            include_baseline: true,
        }
    }
}

/// Forecast window
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSection {
    /// Valuation date; defaults to each asset's last observation
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Target date of the forecast
    pub end_date: NaiveDate,
}

/// One asset to forecast
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEntry {
    /// Ticker symbol (for logging and the report)
    pub symbol: String,
    /// CSV file with `date,close` columns
    pub prices_file: String,
}

impl AssetEntry {
    /// Price file path with `~` expanded
    pub fn prices_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.prices_file).to_string())
    }
}

/// Output configuration section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputSection {
    /// JSON report path
    #[serde(default)]
    pub report_file: Option<String>,
}

impl OutputSection {
    pub fn report_path(&self) -> Option<PathBuf> {
        self.report_file
            .as_deref()
            .map(|f| PathBuf::from(shellexpand::tilde(f).to_string()))
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file, apply environment overrides, validate
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;
    config.apply_env_overrides()?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate configuration from TOML text. The environment is not consulted.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn parse_override<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e| {
        ConfigError::ValidationError(format!("{} must be a non-negative integer, got {:?}: {}", key, raw, e))
    })
}

impl Config {
    /// Apply `WILCKE_SEED` / `WILCKE_PATH_COUNT` from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparsable values are rejected;
    /// range checks are left to `validate`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_ENV) {
            self.simulation.seed = Some(parse_override(SEED_ENV, &raw)?);
        }
        if let Some(raw) = lookup(PATH_COUNT_ENV) {
            self.simulation.path_count = parse_override(PATH_COUNT_ENV, &raw)?;
        }
        Ok(())
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.steps_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "steps_per_year must be > 0".to_string(),
            ));
        }

        if self.simulation.path_count == 0 {
            return Err(ConfigError::ValidationError(
                "path_count must be > 0".to_string(),
            ));
        }

        if !(self.model.theta.is_finite() && self.model.theta >= 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "theta must be >= 0, got {}",
                self.model.theta
            )));
        }

        if let Some(start) = self.forecast.start_date {
            if self.forecast.end_date <= start {
                return Err(ConfigError::ValidationError(format!(
                    "end_date {} must be after start_date {}",
                    self.forecast.end_date, start
                )));
            }
        }

        if self.assets.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one [[assets]] entry is required".to_string(),
            ));
        }

        for asset in &self.assets {
            if asset.symbol.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "asset symbol cannot be empty".to_string(),
                ));
            }
            if asset.prices_file.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "prices_file cannot be empty for {}",
                    asset.symbol
                )));
            }
        }

        Ok(())
    }
}
