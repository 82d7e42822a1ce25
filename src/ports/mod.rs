//! Ports Layer - Trait definitions for external collaborators
//!
//! Following hexagonal architecture, these traits abstract:
//! - Price history sources (clean, positive, gap-free series per symbol)
//! - Report sinks (files, plots, dashboards)

pub mod price_source;
pub mod report_sink;
pub mod mocks;

pub use price_source::{PriceSource, PriceSourceError};
pub use report_sink::{ReportSink, ReportError};
