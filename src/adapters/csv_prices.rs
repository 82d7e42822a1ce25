//! CSV Price Source
//!
//! Reads `date,close` files, one per symbol. Rows are sorted by date and empty
//! `close` cells are forward-filled, then back-filled for any leading gap.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{DatedPriceSeries, PriceSeries};
use crate::ports::{PriceSource, PriceSourceError};

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(alias = "Date")]
    date: NaiveDate,
    #[serde(alias = "Close")]
    close: Option<f64>,
}

fn map_csv_error(path: &Path, e: csv::Error) -> PriceSourceError {
    if e.is_io_error() {
        PriceSourceError::Io(format!("{}: {}", path.display(), e))
    } else {
        PriceSourceError::ParseError(format!("{}: {}", path.display(), e))
    }
}

/// Forward-fill then back-fill missing values. Returns the number of filled cells,
/// or `None` when every value is missing.
fn fill_gaps(values: &mut [Option<f64>]) -> Option<usize> {
    let first = values.iter().flatten().next().copied()?;
    let mut filled = 0;
    let mut last = first;
    for v in values.iter_mut() {
        match v {
            Some(x) => last = *x,
            None => {
                *v = Some(last);
                filled += 1;
            }
        }
    }
    Some(filled)
}

/// Read one CSV price file into a dated series
pub fn read_price_csv(symbol: &str, path: &Path) -> Result<DatedPriceSeries, PriceSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<PriceRow>() {
        rows.push(record.map_err(|e| map_csv_error(path, e))?);
    }
    rows.sort_by_key(|r| r.date);

    let mut closes: Vec<Option<f64>> = rows.iter().map(|r| r.close).collect();
    let filled = fill_gaps(&mut closes).ok_or_else(|| PriceSourceError::Empty(symbol.to_string()))?;
    if filled > 0 {
        tracing::warn!(symbol, filled, "filled missing closes");
    }

    let dates = rows.iter().map(|r| r.date).collect();
    let prices = PriceSeries::new(closes.into_iter().flatten().collect())?;
    tracing::debug!(symbol, observations = prices.len(), path = %path.display(), "loaded prices");

    Ok(DatedPriceSeries::new(symbol, dates, prices)?)
}

/// Price source backed by one CSV file per symbol
#[derive(Debug, Clone, Default)]
pub struct CsvPriceSource {
    files: HashMap<String, PathBuf>,
}

impl CsvPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the CSV file for a symbol
    pub fn with_file(mut self, symbol: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.insert(symbol.into(), path.into());
        self
    }
}

impl PriceSource for CsvPriceSource {
    fn load(&self, symbol: &str) -> Result<DatedPriceSeries, PriceSourceError> {
        let path = self
            .files
            .get(symbol)
            .ok_or_else(|| PriceSourceError::UnknownSymbol(symbol.to_string()))?;
        read_price_csv(symbol, path)
    }
}
