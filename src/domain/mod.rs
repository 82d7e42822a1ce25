//! Domain Layer - Core types for the heavy-tailed forecasting engine
//!
//! Pure data types and validation with no I/O:
//! - `series`: positive price series, log returns, date/horizon helpers
//! - `params`: SDE model parameters, stable fit, simulation grid
//! - `ensemble`: simulated path ensemble and its summary
//! - `report`: per-asset forecast artifacts for reporting collaborators
//! - `error`: the `ForecastError` taxonomy

pub mod error;
pub mod series;
pub mod params;
pub mod ensemble;
pub mod report;

pub use error::{ForecastError, ForecastResult};
pub use series::{PriceSeries, ReturnSeries, DatedPriceSeries, horizon_years, date_at};
pub use params::{ModelParameters, StableFit, SimulationConfig, TRADING_DAYS_PER_YEAR};
pub use ensemble::{PathEnsemble, ForecastSummary};
pub use report::{AssetForecast, BaselineForecast, ForecastReport};
