//! Model Parameter Estimation
//!
//! Converts an observed price history into SDE parameters:
//! - drift: OLS slope of log(price) against the observation index, annualized by 252
//! - volatility: std(log_returns) * sqrt(252)
//! - stable shape: a kurtosis heuristic rather than maximum likelihood
//!
//! Kurtosis heuristic:
//! - k = excess kurtosis of the returns (population moments)
//! - alpha = 1.95 when k <= 0, else clamp(2 - 0.1 * ln(1 + k), 1.1, 1.95)
//! - beta = 0 (symmetric noise)
//! - loc = mean(returns), scale = std(returns) / sqrt(2)
//!
//! All functions are pure: the same input always yields bit-identical output.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::domain::{
    ForecastError, ForecastResult, ModelParameters, PriceSeries, StableFit, TRADING_DAYS_PER_YEAR,
};

/// Minimum observations for any estimator
const MIN_OBSERVATIONS: usize = 2;
/// Alpha used for near-Gaussian or light-tailed samples
const NEAR_GAUSSIAN_ALPHA: f64 = 1.95;
/// Heaviest tail the heuristic will report
const MIN_ALPHA: f64 = 1.1;
/// Sensitivity of alpha to log(1 + excess kurtosis)
const KURTOSIS_SLOPE: f64 = 0.1;
/// Variance below which kurtosis is undefined and treated as zero
const MIN_VARIANCE: f64 = 1e-300;

fn require_len(actual: usize) -> ForecastResult<()> {
    if actual < MIN_OBSERVATIONS {
        return Err(ForecastError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual,
        });
    }
    Ok(())
}

/// Annualized drift from the least-squares trend of log prices
pub fn estimate_drift(prices: &PriceSeries) -> ForecastResult<f64> {
    require_len(prices.len())?;

    let y = prices.log_prices();
    let n = y.len() as f64;
    let mean_x = (n - 1.0) / 2.0;
    let mean_y = y.iter().mean();

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (i, yi) in y.iter().enumerate() {
        let dx = i as f64 - mean_x;
        sxy += dx * (yi - mean_y);
        sxx += dx * dx;
    }

    let slope = sxy / sxx;
    Ok(slope * TRADING_DAYS_PER_YEAR)
}

/// Annualized volatility from the sample standard deviation of returns
pub fn estimate_volatility(returns: &[f64]) -> ForecastResult<f64> {
    require_len(returns.len())?;
    Ok(returns.std_dev() * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Population excess kurtosis m4 / m2^2 - 3; zero when the sample has no spread
pub fn excess_kurtosis(returns: &[f64]) -> ForecastResult<f64> {
    require_len(returns.len())?;

    let n = returns.len() as f64;
    let mean = returns.mean();
    let (m2, m4) = returns.iter().fold((0.0, 0.0), |(m2, m4), r| {
        let d2 = (r - mean).powi(2);
        (m2 + d2, m4 + d2 * d2)
    });
    let (m2, m4) = (m2 / n, m4 / n);

    if m2 < MIN_VARIANCE {
        return Ok(0.0);
    }
    Ok(m4 / (m2 * m2) - 3.0)
}

/// Map excess kurtosis to a stability index
pub fn alpha_from_kurtosis(k: f64) -> f64 {
    if k <= 0.0 {
        NEAR_GAUSSIAN_ALPHA
    } else {
        (2.0 - KURTOSIS_SLOPE * k.ln_1p()).clamp(MIN_ALPHA, NEAR_GAUSSIAN_ALPHA)
    }
}

/// Heuristic stable fit (alpha, beta, loc, scale)
pub fn estimate_stable_params(returns: &[f64]) -> ForecastResult<StableFit> {
    let k = excess_kurtosis(returns)?;

    Ok(StableFit {
        alpha: alpha_from_kurtosis(k),
        beta: 0.0,
        loc: returns.mean(),
        scale: returns.population_std_dev() / std::f64::consts::SQRT_2,
    })
}

/// Where the long-run level `mu` of the SDE comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanLevel {
    /// Use the annualized drift estimate as `mu`
    #[default]
    Drift,
    /// Use the last observed price as `mu`
    InitialPrice,
}

/// Everything estimated for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimation {
    /// Annualized drift of log prices
    pub drift: f64,
    /// Annualized volatility of log returns
    pub volatility: f64,
    /// Kurtosis-based stable fit
    pub stable: StableFit,
    /// Parameters handed to the simulator
    pub model: ModelParameters,
}

/// Run all estimators over a price history and assemble `ModelParameters`
pub fn estimate_model(prices: &PriceSeries, theta: f64, mean_level: MeanLevel) -> ForecastResult<Estimation> {
    let returns = prices.log_returns();

    let drift = estimate_drift(prices)?;
    let volatility = estimate_volatility(returns.as_slice())?;
    let stable = estimate_stable_params(returns.as_slice())?;

    let mu = match mean_level {
        MeanLevel::Drift => drift,
        MeanLevel::InitialPrice => prices.last().ok_or(ForecastError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: 0,
        })?,
    };

    let model = ModelParameters::new(theta, mu, volatility, stable.alpha, stable.beta)?;

    Ok(Estimation {
        drift,
        volatility,
        stable,
        model,
    })
}
