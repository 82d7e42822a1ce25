//! Wilcke - Levy-stable Mean Reversion Price Forecaster

use anyhow::Result;

use wilcke_forecast::adapters::cli;

fn main() -> Result<()> {
    // Load .env file if it exists (WILCKE_SEED, WILCKE_PATH_COUNT, RUST_LOG)
    dotenvy::dotenv().ok();

    let app = cli::init();
    cli::execute(app)
}
