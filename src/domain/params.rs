//! Model and Simulation Parameters
//!
//! The mean-reverting Levy SDE simulated per asset:
//!
//! dS(t) = theta * (mu - S(t)) dt + sigma * S(t) dL(alpha, beta)
//!
//! - theta: mean reversion speed
//! - mu: long-run level the price reverts toward
//! - sigma: volatility scale of the noise term
//! - alpha: stability index of the Levy noise (2 = Gaussian, < 2 = heavy tails)
//! - beta: skewness of the Levy noise

use serde::{Deserialize, Serialize};

use super::error::{ForecastError, ForecastResult};

/// Trading periods per year used for annualization
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Tolerance applied before flooring `horizon / step` so exact multiples are not lost to rounding
const GRID_EPSILON: f64 = 1e-9;

/// Check `alpha` in (0, 2] and `beta` in [-1, 1]
pub(crate) fn validate_stable_shape(alpha: f64, beta: f64) -> ForecastResult<()> {
    if !(alpha > 0.0 && alpha <= 2.0) {
        return Err(ForecastError::invalid(format!("alpha must be in (0, 2], got {}", alpha)));
    }
    if !(-1.0..=1.0).contains(&beta) {
        return Err(ForecastError::invalid(format!("beta must be in [-1, 1], got {}", beta)));
    }
    Ok(())
}

/// Parameters of the mean-reverting stable SDE for one asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    /// Mean reversion speed (0 disables reversion)
    pub theta: f64,
    /// Long-run level
    pub mu: f64,
    /// Volatility scale applied to the noise increment
    pub sigma: f64,
    /// Stability index in (0, 2]
    pub alpha: f64,
    /// Skewness in [-1, 1]
    pub beta: f64,
}

impl ModelParameters {
    pub fn new(theta: f64, mu: f64, sigma: f64, alpha: f64, beta: f64) -> ForecastResult<Self> {
        let params = Self { theta, mu, sigma, alpha, beta };
        params.validate()?;
        Ok(params)
    }

    /// Validate all parameters
    pub fn validate(&self) -> ForecastResult<()> {
        if !(self.theta.is_finite() && self.theta >= 0.0) {
            return Err(ForecastError::invalid(format!("theta must be >= 0, got {}", self.theta)));
        }
        if !self.mu.is_finite() {
            return Err(ForecastError::invalid(format!("mu must be finite, got {}", self.mu)));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(ForecastError::invalid(format!("sigma must be >= 0, got {}", self.sigma)));
        }
        validate_stable_shape(self.alpha, self.beta)
    }

    /// Whether the noise degenerates to a Gaussian
    pub fn is_gaussian(&self) -> bool {
        self.alpha == 2.0
    }
}

/// Stable distribution fit returned by the kurtosis heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StableFit {
    pub alpha: f64,
    pub beta: f64,
    pub loc: f64,
    pub scale: f64,
}

/// Discretization grid and ensemble size for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Price at step 0 of every path
    pub initial_price: f64,
    /// Total simulated horizon in years
    pub horizon_years: f64,
    /// Width of one step in years
    pub step_size: f64,
    /// Number of independent paths
    pub path_count: usize,
}

impl SimulationConfig {
    pub fn new(initial_price: f64, horizon_years: f64, step_size: f64, path_count: usize) -> ForecastResult<Self> {
        let config = Self {
            initial_price,
            horizon_years,
            step_size,
            path_count,
        };
        config.validate()?;
        Ok(config)
    }

    /// Daily steps (1/252 year) over the given horizon
    pub fn daily(initial_price: f64, horizon_years: f64, path_count: usize) -> ForecastResult<Self> {
        Self::new(initial_price, horizon_years, 1.0 / TRADING_DAYS_PER_YEAR, path_count)
    }

    /// Validate the grid and starting price
    pub fn validate(&self) -> ForecastResult<()> {
        if !(self.initial_price.is_finite() && self.initial_price > 0.0) {
            return Err(ForecastError::NonPositivePrice {
                index: 0,
                value: self.initial_price,
            });
        }
        if !(self.horizon_years.is_finite() && self.horizon_years > 0.0) {
            return Err(ForecastError::invalid(format!(
                "horizon_years must be > 0, got {}",
                self.horizon_years
            )));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ForecastError::invalid(format!(
                "step_size must be > 0, got {}",
                self.step_size
            )));
        }
        if self.path_count == 0 {
            return Err(ForecastError::EmptyEnsemble);
        }
        if self.steps() < 1 {
            return Err(ForecastError::invalid(format!(
                "horizon {} shorter than one step of {}",
                self.horizon_years, self.step_size
            )));
        }
        Ok(())
    }

    /// Number of grid points N = floor(horizon / step)
    pub fn steps(&self) -> usize {
        (self.horizon_years / self.step_size + GRID_EPSILON).floor() as usize
    }

    /// Grid times t_i = i * step_size for i in 0..N
    pub fn time_grid(&self) -> Vec<f64> {
        (0..self.steps()).map(|i| i as f64 * self.step_size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_model_parameters_validation() {
        assert!(ModelParameters::new(0.5, 0.1, 0.3, 1.7, 0.0).is_ok());
        assert!(ModelParameters::new(0.0, 0.1, 0.0, 2.0, -1.0).is_ok());

        assert!(ModelParameters::new(-0.1, 0.1, 0.3, 1.7, 0.0).is_err());
        assert!(ModelParameters::new(0.5, 0.1, -0.3, 1.7, 0.0).is_err());
        assert!(ModelParameters::new(0.5, 0.1, 0.3, 0.0, 0.0).is_err());
        assert!(ModelParameters::new(0.5, 0.1, 0.3, 2.01, 0.0).is_err());
        assert!(ModelParameters::new(0.5, 0.1, 0.3, 1.7, 1.5).is_err());
        assert!(ModelParameters::new(0.5, f64::NAN, 0.3, 1.7, 0.0).is_err());
    }

    #[test]
    fn test_is_gaussian() {
        let params = ModelParameters::new(0.5, 0.1, 0.3, 2.0, 0.0).unwrap();
        assert!(params.is_gaussian());
        let params = ModelParameters::new(0.5, 0.1, 0.3, 1.9, 0.0).unwrap();
        assert!(!params.is_gaussian());
    }

    #[test]
    fn test_daily_grid() {
        let config = SimulationConfig::daily(100.0, 1.0, 5).unwrap();
        assert_eq!(config.steps(), 252);

        let grid = config.time_grid();
        assert_eq!(grid.len(), 252);
        assert_eq!(grid[0], 0.0);
        assert_relative_eq!(grid[251], 251.0 / 252.0, epsilon = 1e-12);
    }

    #[test]
    fn test_grid_rounds_down() {
        let config = SimulationConfig::new(100.0, 1.0, 0.3, 1).unwrap();
        assert_eq!(config.steps(), 3);
    }

    #[test]
    fn test_simulation_config_validation() {
        assert!(matches!(
            SimulationConfig::new(0.0, 1.0, 0.01, 5),
            Err(ForecastError::NonPositivePrice { .. })
        ));
        assert!(matches!(
            SimulationConfig::new(100.0, 1.0, 0.01, 0),
            Err(ForecastError::EmptyEnsemble)
        ));
        assert!(SimulationConfig::new(100.0, -1.0, 0.01, 5).is_err());
        assert!(SimulationConfig::new(100.0, 1.0, 0.0, 5).is_err());
        // horizon shorter than a single step
        assert!(SimulationConfig::new(100.0, 0.001, 0.01, 5).is_err());
    }
}
