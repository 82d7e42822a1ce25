//! Forecast Report Model
//!
//! Per-asset artifacts handed to reporting collaborators: estimated
//! parameters, the summary band, a handful of raw paths, and the optional
//! GBM baseline. No file format is implied here; adapters choose one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ensemble::ForecastSummary;
use super::params::{ModelParameters, SimulationConfig, StableFit};

/// Baseline GBM result for comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineForecast {
    pub drift: f64,
    pub volatility: f64,
    pub summary: ForecastSummary,
}

/// Everything produced for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetForecast {
    pub symbol: String,
    /// Date of the last observed price (grid time 0)
    pub start_date: NaiveDate,
    /// Calendar date of each grid point
    pub dates: Vec<NaiveDate>,
    /// Annualized drift estimate
    pub drift: f64,
    /// Annualized volatility estimate
    pub volatility: f64,
    /// Kurtosis-based stable fit
    pub stable: StableFit,
    /// Parameters used for the simulation
    pub model: ModelParameters,
    /// Grid and ensemble size
    pub simulation: SimulationConfig,
    /// Seed of this asset's ensemble
    pub seed: u64,
    pub summary: ForecastSummary,
    /// First few raw trajectories
    pub sample_paths: Vec<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineForecast>,
}

/// Report for a whole forecasting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub end_date: NaiveDate,
    pub assets: Vec<AssetForecast>,
}

impl ForecastReport {
    pub fn asset(&self, symbol: &str) -> Option<&AssetForecast> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }
}
