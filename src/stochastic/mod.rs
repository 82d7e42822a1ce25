//! Stochastic Engine - Heavy-tailed simulation and parameter calibration
//!
//! Implements the forecasting core:
//! - Alpha-stable noise sampling (Chambers-Mallows-Stuck)
//! - Drift, volatility and stable-shape estimation from price history
//! - Wilcke process: mean-reverting SDE driven by stable Levy noise
//! - Geometric Brownian Motion baseline on the same grid
//! - Ensemble summary (mean path with 5th/95th percentile band)
//!
//! Data flow: prices -> estimator -> ModelParameters -> WilckeProcess -> PathEnsemble -> summarize

pub mod stable_noise;
pub mod estimator;
pub mod paths;
pub mod wilcke;
pub mod gbm;
pub mod summary;

pub use stable_noise::{StableNoise, sample_stable};
pub use estimator::{
    estimate_drift, estimate_volatility, estimate_stable_params, estimate_model,
    excess_kurtosis, alpha_from_kurtosis, Estimation, MeanLevel,
};
pub use paths::PathSimulator;
pub use wilcke::{WilckeProcess, PRICE_FLOOR};
pub use gbm::GbmProcess;
pub use summary::{summarize, summarize_with, LOWER_PERCENTILE, UPPER_PERCENTILE};
