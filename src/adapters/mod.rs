//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - CSV: daily closing prices from `date,close` files
//! - JSON: forecast report writer
//! - CLI: Command-line interface handlers

pub mod csv_prices;
pub mod json_report;
pub mod cli;

pub use csv_prices::{read_price_csv, CsvPriceSource};
pub use json_report::JsonReportWriter;
pub use cli::CliApp;
