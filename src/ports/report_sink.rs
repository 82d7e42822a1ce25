use thiserror::Error;

use crate::domain::ForecastReport;

/// Report publishing error type
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Receives finished forecast reports (files, plots, dashboards)
pub trait ReportSink {
    fn publish(&self, report: &ForecastReport) -> Result<(), ReportError>;
}
