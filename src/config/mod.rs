//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, SimulationSection, ModelSection, ForecastSection, AssetEntry,
    OutputSection, LoggingSection, load_config, parse_config, SEED_ENV, PATH_COUNT_ENV,
};
