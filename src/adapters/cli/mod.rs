//! CLI Adapter
//!
//! Command-line interface for the forecaster.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{execute, CliApp, Command, EstimateCmd, ForecastCmd};

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
