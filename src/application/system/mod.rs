use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub mod scheduler;
pub mod shutdown;

use crate::application::system::{scheduler::UpdateScheduler, shutdown::ShutdownSignal};
use crate::config::Config;
use crate::domain::ports::{MarketDataProvider, ReportSink};
use crate::infrastructure::{CoinGeckoClient, XlsxReportWriter};

pub struct Application {
    pub config: Config,
    pub scheduler: UpdateScheduler,
}

impl Application {
    /// Wires the CoinGecko provider and the xlsx report writer.
    pub fn build(config: Config) -> Result<Self> {
        info!(
            "Building cryptosheet (source: {}, report: {})",
            config.api.base_url,
            config.report.output_path.display()
        );
        if config.api.api_key.is_some() {
            info!("CoinGecko API key configured, sending it with each request");
        }

        let provider: Arc<dyn MarketDataProvider> = Arc::new(
            CoinGeckoClient::new(&config.api).context("Failed to build CoinGecko HTTP client")?,
        );
        let sink: Arc<dyn ReportSink> =
            Arc::new(XlsxReportWriter::new(config.report.output_path.clone()));

        Ok(Self::with_services(config, provider, sink))
    }

    /// Builds the application around arbitrary ports.
    pub fn with_services(
        config: Config,
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        let scheduler = UpdateScheduler::new(provider, sink, &config.scheduler);
        Self { config, scheduler }
    }

    /// Runs the scheduler until Ctrl+C, the cycle limit, or a fatal cycle error.
    pub async fn run(self) -> Result<()> {
        let (signal, shutdown_rx) = ShutdownSignal::new();
        let listener = signal.listen_for_ctrl_c();

        let result = self.scheduler.run(shutdown_rx).await;
        listener.abort();

        let cycles = result?;
        info!("Scheduler stopped after {} cycles.", cycles);
        Ok(())
    }
}
