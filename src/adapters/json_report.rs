//! JSON Report Writer
//!
//! Writes a `ForecastReport` as pretty-printed JSON, creating parent
//! directories as needed.

use std::path::{Path, PathBuf};

use crate::domain::ForecastReport;
use crate::ports::{ReportError, ReportSink};

/// Report sink writing one JSON file
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonReportWriter {
    fn publish(&self, report: &ForecastReport) -> Result<(), ReportError> {
        let content = serde_json::to_string_pretty(report)
            .map_err(|e| ReportError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;

        tracing::info!(path = %self.path.display(), assets = report.assets.len(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn test_write_report_creates_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("forecast.json");
        let writer = JsonReportWriter::new(&path);
        assert_eq!(writer.path(), path.as_path());

        let report = ForecastReport {
            end_date: NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
            assets: vec![],
        };
        writer.publish(&report).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: ForecastReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
        assert!(content.contains("\"end_date\": \"2030-12-31\""));
    }
}
