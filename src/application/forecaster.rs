//! Forecast Pipeline
//!
//! Coordinates estimation and simulation for each configured asset:
//! load prices -> estimate parameters -> simulate Wilcke ensemble -> summarize,
//! optionally alongside the GBM baseline. Assets are independent and run in
//! parallel, each on its own seed derived from the run seed.

use chrono::NaiveDate;
use rayon::prelude::*;
use thiserror::Error;

use crate::config::Config;
use crate::domain::{
    date_at, horizon_years, AssetForecast, BaselineForecast, DatedPriceSeries, ForecastError,
    ForecastReport, ForecastResult, SimulationConfig, TRADING_DAYS_PER_YEAR,
};
use crate::ports::{PriceSource, PriceSourceError, ReportError, ReportSink};
use crate::stochastic::{
    estimate_model, summarize, GbmProcess, MeanLevel, PathSimulator, WilckeProcess,
};

/// Mixes the asset index into the run seed
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error)]
pub enum ForecasterError {
    #[error("Price data error for {symbol}: {source}")]
    PriceData {
        symbol: String,
        #[source]
        source: PriceSourceError,
    },
    #[error("Forecast failed for {symbol}: {source}")]
    Forecast {
        symbol: String,
        #[source]
        source: ForecastError,
    },
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Settings shared by every asset in a run
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOptions {
    /// Mean reversion speed
    pub theta: f64,
    /// Source of the long-run level
    pub mean_level: MeanLevel,
    /// Grid step in years
    pub step_size: f64,
    /// Paths per asset
    pub path_count: usize,
    /// Raw paths kept in each asset report
    pub sample_paths: usize,
    /// Also run the GBM baseline
    pub include_baseline: bool,
    /// Valuation date; each asset's last observation when `None`
    pub start_date: Option<NaiveDate>,
    /// Forecast target date
    pub end_date: NaiveDate,
}

impl ForecastOptions {
    /// Daily grid, 50 paths, theta 0.5 with the drift as long-run level
    pub fn new(end_date: NaiveDate) -> Self {
        Self {
            theta: 0.5,
            mean_level: MeanLevel::Drift,
            step_size: 1.0 / TRADING_DAYS_PER_YEAR,
            path_count: 50,
            sample_paths: 10,
            include_baseline: true,
            start_date: None,
            end_date,
        }
    }

    pub fn with_path_count(mut self, path_count: usize) -> Self {
        self.path_count = path_count;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_baseline(mut self, include: bool) -> Self {
        self.include_baseline = include;
        self
    }
}

impl From<&Config> for ForecastOptions {
    fn from(config: &Config) -> Self {
        ForecastOptions {
            theta: config.model.theta,
            mean_level: config.model.mean_level,
            step_size: config.simulation.step_size(),
            path_count: config.simulation.path_count,
            sample_paths: config.simulation.sample_paths,
            include_baseline: config.model.include_baseline,
            start_date: config.forecast.start_date,
            end_date: config.forecast.end_date,
        }
    }
}

/// Seed of the `index`-th asset in a run
pub fn asset_seed(run_seed: u64, index: usize) -> u64 {
    run_seed ^ (index as u64 + 1).wrapping_mul(SEED_MIX)
}

/// Runs the estimation and simulation pipeline over a price source
pub struct Forecaster<P> {
    source: P,
    options: ForecastOptions,
}

impl<P: PriceSource + Sync> Forecaster<P> {
    pub fn new(source: P, options: ForecastOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &ForecastOptions {
        &self.options
    }

    /// Forecast one asset already loaded in memory
    pub fn forecast_series(&self, series: &DatedPriceSeries, seed: u64) -> ForecastResult<AssetForecast> {
        let opts = &self.options;
        let estimation = estimate_model(&series.prices, opts.theta, opts.mean_level)?;

        let start_date = opts
            .start_date
            .or_else(|| series.last_date())
            .ok_or(ForecastError::InsufficientData { required: 2, actual: 0 })?;
        let horizon = horizon_years(start_date, opts.end_date)?;
        let initial_price = series
            .prices
            .last()
            .ok_or(ForecastError::InsufficientData { required: 2, actual: 0 })?;

        let simulation = SimulationConfig::new(initial_price, horizon, opts.step_size, opts.path_count)?;
        let wilcke = WilckeProcess::new(estimation.model)?;
        let ensemble = wilcke.simulate_seeded(&simulation, seed)?;
        let summary = summarize(&ensemble)?;

        tracing::info!(
            symbol = %series.symbol,
            drift = estimation.drift,
            volatility = estimation.volatility,
            alpha = estimation.stable.alpha,
            beta = estimation.stable.beta,
            steps = ensemble.steps(),
            paths = ensemble.path_count(),
            "simulated {} ensemble",
            wilcke.name()
        );

        let baseline = if opts.include_baseline {
            let gbm = GbmProcess::new(estimation.drift, estimation.volatility)?;
            let baseline_ensemble = gbm.simulate_seeded(&simulation, seed.rotate_left(32))?;
            Some(BaselineForecast {
                drift: gbm.drift,
                volatility: gbm.volatility,
                summary: summarize(&baseline_ensemble)?,
            })
        } else {
            None
        };

        let dates = ensemble.times().iter().map(|&t| date_at(start_date, t)).collect();
        let sample_paths = ensemble.paths().iter().take(opts.sample_paths).cloned().collect();

        Ok(AssetForecast {
            symbol: series.symbol.clone(),
            start_date,
            dates,
            drift: estimation.drift,
            volatility: estimation.volatility,
            stable: estimation.stable,
            model: estimation.model,
            simulation,
            seed,
            summary,
            sample_paths,
            baseline,
        })
    }

    /// Load and forecast one asset
    pub fn forecast_asset(&self, symbol: &str, seed: u64) -> Result<AssetForecast, ForecasterError> {
        let series = self.source.load(symbol).map_err(|source| ForecasterError::PriceData {
            symbol: symbol.to_string(),
            source,
        })?;

        self.forecast_series(&series, seed)
            .map_err(|source| ForecasterError::Forecast {
                symbol: symbol.to_string(),
                source,
            })
    }

    /// Forecast every symbol; fails on the first asset error
    pub fn run(&self, symbols: &[String], run_seed: u64) -> Result<ForecastReport, ForecasterError> {
        tracing::info!(assets = symbols.len(), run_seed, end_date = %self.options.end_date, "starting forecast run");

        let assets = symbols
            .par_iter()
            .enumerate()
            .map(|(i, symbol)| self.forecast_asset(symbol, asset_seed(run_seed, i)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ForecastReport {
            end_date: self.options.end_date,
            assets,
        })
    }

    /// Run and hand the report to a sink
    pub fn run_and_publish<S: ReportSink>(
        &self,
        symbols: &[String],
        run_seed: u64,
        sink: &S,
    ) -> Result<ForecastReport, ForecasterError> {
        let report = self.run(symbols, run_seed)?;
        sink.publish(&report)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceSeries;
    use crate::ports::mocks::{MockPriceSource, MockReportSink};
    use crate::stochastic::PRICE_FLOOR;

    fn synthetic_series(symbol: &str, n: usize) -> DatedPriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dates = (0..n as i64).map(|d| start + chrono::Duration::days(d)).collect();
        let prices = (0..n)
            .map(|i| {
                let t = i as f64;
                50.0 * (0.0005 * t).exp() * (1.0 + 0.02 * (t * 0.7).sin() + 0.01 * (t * 2.3).cos())
            })
            .collect();
        DatedPriceSeries::new(symbol, dates, PriceSeries::new(prices).unwrap()).unwrap()
    }

    fn options() -> ForecastOptions {
        ForecastOptions::new(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()).with_path_count(20)
    }

    #[test]
    fn test_forecast_series() {
        let series = synthetic_series("VALE3", 300);
        let forecaster = Forecaster::new(MockPriceSource::new(), options());

        let forecast = forecaster.forecast_series(&series, 7).unwrap();
        assert_eq!(forecaster.options().path_count, 20);

        assert_eq!(forecast.symbol, "VALE3");
        assert_eq!(Some(forecast.start_date), series.last_date());
        assert_eq!(forecast.simulation.initial_price, series.prices.last().unwrap());
        assert_eq!(forecast.summary.len(), forecast.simulation.steps());
        assert_eq!(forecast.simulation.path_count, 20);
        assert_eq!(forecast.dates.len(), forecast.summary.len());
        assert_eq!(forecast.dates[0], forecast.start_date);
        assert_eq!(forecast.sample_paths.len(), 10);
        assert_eq!(forecast.model.mu, forecast.drift);
        assert_eq!(forecast.model.sigma, forecast.volatility);
        assert!(forecast.summary.lower_band.iter().all(|&v| v >= PRICE_FLOOR));

        let baseline = forecast.baseline.expect("baseline requested");
        assert_eq!(baseline.summary.len(), forecast.summary.len());
    }

    #[test]
    fn test_forecast_is_reproducible() {
        let series = synthetic_series("PETR4", 200);
        let forecaster = Forecaster::new(MockPriceSource::new(), options());

        let a = forecaster.forecast_series(&series, 99).unwrap();
        let b = forecaster.forecast_series(&series, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_end_before_last_observation() {
        let series = synthetic_series("ITUB4", 100);
        let opts = ForecastOptions::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let forecaster = Forecaster::new(MockPriceSource::new(), opts);

        assert!(matches!(
            forecaster.forecast_series(&series, 1),
            Err(ForecastError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_run_over_price_source() {
        let source = MockPriceSource::new()
            .with_series(synthetic_series("VALE3", 250))
            .with_series(synthetic_series("ABEV3", 250));
        let forecaster = Forecaster::new(source, options().with_baseline(false));
        let sink = MockReportSink::new();

        let symbols = vec!["VALE3".to_string(), "ABEV3".to_string()];
        let report = forecaster.run_and_publish(&symbols, 2026, &sink).unwrap();

        assert_eq!(report.assets.len(), 2);
        assert_eq!(report.assets[0].symbol, "VALE3");
        assert_eq!(report.assets[1].seed, asset_seed(2026, 1));
        assert!(report.asset("ABEV3").unwrap().baseline.is_none());
        assert_eq!(sink.reports(), vec![report]);
    }

    #[test]
    fn test_run_unknown_symbol() {
        let forecaster = Forecaster::new(MockPriceSource::new(), options());
        let result = forecaster.run(&["BBDC4".to_string()], 1);
        assert!(matches!(
            result,
            Err(ForecasterError::PriceData { ref symbol, .. }) if symbol == "BBDC4"
        ));
    }

    #[test]
    fn test_run_short_series() {
        let source = MockPriceSource::new().with_series(synthetic_series("BBDC4", 2));
        let forecaster = Forecaster::new(source, options());
        assert!(matches!(
            forecaster.run(&["BBDC4".to_string()], 1),
            Err(ForecasterError::Forecast {
                source: ForecastError::InsufficientData { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_asset_seeds_differ() {
        assert_ne!(asset_seed(42, 0), asset_seed(42, 1));
        assert_ne!(asset_seed(42, 0), 42);
    }
}
