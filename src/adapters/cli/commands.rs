//! CLI Command Handlers
//!
//! Implementation of the `forecast` and `estimate` commands.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::Rng;
use std::path::PathBuf;

use crate::adapters::{read_price_csv, CsvPriceSource, JsonReportWriter};
use crate::application::{ForecastOptions, Forecaster};
use crate::config::load_config;
use crate::domain::{AssetForecast, ForecastReport};
use crate::ports::ReportSink;
use crate::stochastic::{estimate_model, MeanLevel};

/// Wilcke - Levy-stable mean reversion price forecaster
#[derive(Parser, Debug)]
#[command(
    name = "wilcke-forecast",
    version = env!("CARGO_PKG_VERSION"),
    about = "Monte Carlo price forecasts with a mean-reverting alpha-stable SDE",
    long_about = "Estimates drift, volatility and tail heaviness from daily closing prices, \
                  then simulates the Wilcke process and reports the mean path with a 90% band."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast every asset listed in a config file
    Forecast(ForecastCmd),

    /// Print the estimated parameters of one price file
    Estimate(EstimateCmd),
}

/// Run the forecast pipeline
#[derive(Parser, Debug)]
pub struct ForecastCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/forecast.toml")]
    pub config: PathBuf,

    /// Override the run seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Write the JSON report here instead of the configured path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Estimate parameters from a price file
#[derive(Parser, Debug)]
pub struct EstimateCmd {
    /// CSV file with `date,close` columns
    #[arg(short, long, value_name = "FILE")]
    pub prices: PathBuf,

    /// Symbol shown in the output
    #[arg(short, long, value_name = "SYMBOL", default_value = "ASSET")]
    pub symbol: String,

    /// Mean reversion speed
    #[arg(long, value_name = "THETA", default_value = "0.5")]
    pub theta: f64,

    /// Use the last price instead of the drift as long-run level
    #[arg(long)]
    pub initial_price_level: bool,
}

/// Execute the CLI command
pub fn execute(app: CliApp) -> Result<()> {
    match app.command {
        Command::Forecast(cmd) => forecast_command(cmd, app.verbose, app.debug),
        Command::Estimate(cmd) => {
            init_logging(app.verbose, app.debug, "warn")?;
            estimate_command(cmd)
        }
    }
}

/// Initialize logging system. `RUST_LOG` wins over flags and config.
fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let fallback = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        config_level
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Handle forecast command
fn forecast_command(cmd: ForecastCmd, verbose: bool, debug: bool) -> Result<()> {
    let config = load_config(&cmd.config)
        .with_context(|| format!("Failed to load configuration from {}", cmd.config.display()))?;
    init_logging(verbose, debug, &config.logging.level)?;

    tracing::info!("Config: {}", cmd.config.display());

    let source = config
        .assets
        .iter()
        .fold(CsvPriceSource::new(), |src, asset| src.with_file(&asset.symbol, asset.prices_path()));
    let symbols: Vec<String> = config.assets.iter().map(|a| a.symbol.clone()).collect();

    let seed = cmd
        .seed
        .or(config.simulation.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, "run seed");

    let forecaster = Forecaster::new(source, ForecastOptions::from(&config));
    tracing::info!(
        paths = forecaster.options().path_count,
        end_date = %forecaster.options().end_date,
        "forecast options"
    );
    let report = forecaster.run(&symbols, seed).context("Forecast run failed")?;

    print_report(&report);

    if let Some(path) = cmd.output.or_else(|| config.output.report_path()) {
        let writer = JsonReportWriter::new(&path);
        writer
            .publish(&report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("Report written to {}", writer.path().display());
    }

    Ok(())
}

/// Handle estimate command
fn estimate_command(cmd: EstimateCmd) -> Result<()> {
    let series = read_price_csv(&cmd.symbol, &cmd.prices)
        .with_context(|| format!("Failed to read prices from {}", cmd.prices.display()))?;

    let mean_level = if cmd.initial_price_level {
        MeanLevel::InitialPrice
    } else {
        MeanLevel::Drift
    };
    let estimation = estimate_model(&series.prices, cmd.theta, mean_level)
        .context("Estimation failed")?;

    println!("{} ({} observations)", series.symbol, series.prices.len());
    println!("  Drift:       {:>10.4}", estimation.drift);
    println!("  Volatility:  {:>10.4}", estimation.volatility);
    println!("  Alpha:       {:>10.4}", estimation.stable.alpha);
    println!("  Beta:        {:>10.4}", estimation.stable.beta);
    println!("  Loc:         {:>10.6}", estimation.stable.loc);
    println!("  Scale:       {:>10.6}", estimation.stable.scale);
    println!("  Theta:       {:>10.4}", estimation.model.theta);
    println!("  Mu:          {:>10.4}", estimation.model.mu);

    Ok(())
}

fn print_report(report: &ForecastReport) {
    println!("Forecast to {}", report.end_date);
    for asset in &report.assets {
        print_asset(asset);
    }
}

fn print_asset(asset: &AssetForecast) {
    println!();
    println!("{} from {} (seed {})", asset.symbol, asset.start_date, asset.seed);
    println!(
        "  drift {:.4}  vol {:.4}  alpha {:.3}  beta {:.2}",
        asset.drift, asset.volatility, asset.stable.alpha, asset.stable.beta
    );
    println!(
        "  {} paths x {} steps from {:.2}",
        asset.simulation.path_count,
        asset.summary.len(),
        asset.simulation.initial_price
    );

    if let Some((mean, lower, upper)) = asset.summary.terminal() {
        println!("  Wilcke terminal mean {:.2}  90% band [{:.2}, {:.2}]", mean, lower, upper);
    }
    if let Some((mean, lower, upper)) = asset.baseline.as_ref().and_then(|b| b.summary.terminal()) {
        println!("  GBM    terminal mean {:.2}  90% band [{:.2}, {:.2}]", mean, lower, upper);
    }
}
