//! Geometric Brownian Motion Baseline
//!
//! Reference simulator on the same grid as the Wilcke process:
//!
//! S(i) = S(i-1) * exp((mu - sigma^2 / 2) dt + sigma sqrt(dt) Z), Z ~ N(0, 1)
//!
//! The exponential form keeps every price positive, so no floor is applied.

use rand::distributions::Distribution;
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;

use super::paths::{generate, PathSimulator};
use crate::domain::{ForecastError, ForecastResult, PathEnsemble, SimulationConfig};

/// GBM with annualized drift and volatility
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmProcess {
    /// Annualized drift (mu)
    pub drift: f64,
    /// Annualized volatility (sigma)
    pub volatility: f64,
}

impl GbmProcess {
    pub fn new(drift: f64, volatility: f64) -> ForecastResult<Self> {
        let gbm = Self { drift, volatility };
        gbm.validate()?;
        Ok(gbm)
    }

    pub fn validate(&self) -> ForecastResult<()> {
        if !self.drift.is_finite() {
            return Err(ForecastError::invalid(format!("drift must be finite, got {}", self.drift)));
        }
        if !(self.volatility.is_finite() && self.volatility >= 0.0) {
            return Err(ForecastError::invalid(format!(
                "volatility must be >= 0, got {}",
                self.volatility
            )));
        }
        Ok(())
    }
}

impl PathSimulator for GbmProcess {
    fn name(&self) -> &'static str {
        "gbm"
    }

    fn simulate<R: Rng + ?Sized>(&self, config: &SimulationConfig, rng: &mut R) -> ForecastResult<PathEnsemble> {
        config.validate()?;
        self.validate()?;

        let dt = config.step_size;
        let log_drift = (self.drift - 0.5 * self.volatility.powi(2)) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::invalid(e.to_string()))?;

        Ok(generate(config, rng, |s_prev, path_rng| {
            let z = normal.sample(path_rng);
            s_prev * (log_drift + vol_sqrt_dt * z).exp()
        }))
    }
}
