use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::price_source::{PriceSource, PriceSourceError};
use super::report_sink::{ReportError, ReportSink};
use crate::domain::{DatedPriceSeries, ForecastReport};

/// In-memory price source that records which symbols were requested
#[derive(Debug, Default)]
pub struct MockPriceSource {
    calls: Arc<Mutex<Vec<String>>>,
    series: HashMap<String, DatedPriceSeries>,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to register a series under its symbol
    pub fn with_series(mut self, series: DatedPriceSeries) -> Self {
        self.series.insert(series.symbol.clone(), series);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl PriceSource for MockPriceSource {
    fn load(&self, symbol: &str) -> Result<DatedPriceSeries, PriceSourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(symbol.to_string());
        }
        self.series
            .get(symbol)
            .cloned()
            .ok_or_else(|| PriceSourceError::UnknownSymbol(symbol.to_string()))
    }
}

/// Report sink that keeps every published report in memory
#[derive(Debug, Default, Clone)]
pub struct MockReportSink {
    reports: Arc<Mutex<Vec<ForecastReport>>>,
}

impl MockReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all published reports
    pub fn reports(&self) -> Vec<ForecastReport> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl ReportSink for MockReportSink {
    fn publish(&self, report: &ForecastReport) -> Result<(), ReportError> {
        self.reports
            .lock()
            .map_err(|e| ReportError::Serialization(e.to_string()))?
            .push(report.clone());
        Ok(())
    }
}
