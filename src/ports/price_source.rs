use thiserror::Error;

use crate::domain::{DatedPriceSeries, ForecastError};

/// Price source error type
#[derive(Error, Debug)]
pub enum PriceSourceError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Data parsing error: {0}")]
    ParseError(String),

    #[error("No prices available for {0}")]
    Empty(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(#[from] ForecastError),
}

/// Supplies a clean, positive, gap-free price history per asset symbol
pub trait PriceSource {
    /// Load the full dated history for `symbol`, oldest first
    fn load(&self, symbol: &str) -> Result<DatedPriceSeries, PriceSourceError>;
}
