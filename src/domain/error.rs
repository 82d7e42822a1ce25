//! Forecast Error Types
//!
//! Every failure the estimation and simulation engine can report. All of them
//! are raised during input validation, before any path is generated.

use thiserror::Error;

/// Errors produced by the sampler, estimators, simulators and summarizer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Distribution or grid parameter outside its admissible range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Series too short for the requested statistic
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Summary requested over an ensemble with no paths
    #[error("Ensemble contains no paths")]
    EmptyEnsemble,

    /// Price that would break a log or ratio computation
    #[error("Non-positive price {value} at index {index}")]
    NonPositivePrice { index: usize, value: f64 },
}

impl ForecastError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ForecastError::InvalidParameter(msg.into())
    }
}

/// Result alias for the core engine
pub type ForecastResult<T> = Result<T, ForecastError>;
