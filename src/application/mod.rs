//! Application Layer - Forecast pipeline orchestration

pub mod forecaster;

pub use forecaster::{Forecaster, ForecastOptions, ForecasterError, asset_seed};
