//! cryptosheet - top-50 crypto market snapshot to xlsx
//!
//! Polls CoinGecko on a fixed interval and rewrites `crypto_data.xlsx` with
//! the latest table and a small analysis sheet.
//!
//! # Usage
//! ```sh
//! UPDATE_INTERVAL_MINUTES=5 cargo run
//! ```
//!
//! # Environment Variables
//! - `COINGECKO_API_KEY` - Optional demo API key
//! - `COINGECKO_BASE_URL` - API base (default: https://api.coingecko.com/api/v3)
//! - `COINGECKO_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `CRYPTO_REPORT_PATH` - Output file (default: crypto_data.xlsx)
//! - `UPDATE_INTERVAL_MINUTES` - Minutes between cycles (default: 5)
//! - `MAX_CYCLES` - Stop after N cycles (default: run until Ctrl+C)

use anyhow::Result;
use cryptosheet::application::system::Application;
use cryptosheet::config::Config;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("cryptosheet {} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: interval={:?}, max_cycles={:?}",
        config.scheduler.interval, config.scheduler.max_cycles
    );

    let app = Application::build(config)?;
    info!("Press Ctrl+C to shutdown.");
    app.run().await?;

    info!("Exiting.");
    Ok(())
}
