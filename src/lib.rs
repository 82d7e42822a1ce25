//! Wilcke - Levy-stable Mean Reversion Price Forecaster
//!
//! Estimates drift, volatility and tail heaviness from historical closing
//! prices and simulates a mean-reverting SDE driven by alpha-stable noise.
//!
//! # Modules
//!
//! - `domain`: Core types (PriceSeries, ModelParameters, PathEnsemble, ForecastReport)
//! - `stochastic`: Stable noise, estimators, path simulators and summarizer
//! - `ports`: Trait abstractions (PriceSource, ReportSink)
//! - `adapters`: External implementations (CSV prices, JSON report, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Forecast pipeline

pub mod domain;
pub mod stochastic;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
