//! Periodic fetch → transform → analyze → report loop.

use crate::application::market_data::analyzer::analyze;
use crate::application::market_data::transformer::transform;
use crate::config::SchedulerEnvConfig;
use crate::domain::analysis::{CycleSummary, format_usd};
use crate::domain::errors::{CycleError, FailurePolicy};
use crate::domain::ports::{MarketDataProvider, ReportSink};
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// How a cycle ended when it did not fail.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The fetch failed; nothing downstream ran.
    NoData,
    Reported(CycleSummary),
}

pub struct UpdateScheduler {
    provider: Arc<dyn MarketDataProvider>,
    sink: Arc<dyn ReportSink>,
    interval: Duration,
    max_cycles: Option<u64>,
}

impl UpdateScheduler {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        sink: Arc<dyn ReportSink>,
        config: &SchedulerEnvConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            interval: config.interval,
            max_cycles: config.max_cycles,
        }
    }

    /// Runs a single cycle. Every value built here is dropped before return.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        // A failed fetch becomes "no data" and short-circuits the cycle.
        let raw = self
            .provider
            .fetch_markets()
            .await
            .inspect_err(|e| debug!("UpdateScheduler: fetch failed: {}", e))
            .ok();

        let Some(table) = transform(raw.as_deref())? else {
            return Ok(CycleOutcome::NoData);
        };

        let summary = analyze(&table)?;
        self.sink.write_report(&table, &summary).await?;

        // analyze() rejects empty tables, so a leader exists here.
        let (top_name, top_price) = table
            .leader()
            .map(|r| (r.name.clone(), r.current_price))
            .unwrap_or_default();

        Ok(CycleOutcome::Reported(CycleSummary {
            top_name,
            top_price,
            average_price: summary.average_price,
            record_count: table.len(),
        }))
    }

    /// Loops until `shutdown` flips to `true`, the cycle limit is reached, or
    /// a cycle fails with an abort policy. A dropped sender is not a shutdown
    /// request; the loop keeps its schedule.
    ///
    /// Returns the number of cycles started.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<u64, CycleError> {
        info!(
            "UpdateScheduler: Starting (interval: {:?}, max cycles: {:?})",
            self.interval, self.max_cycles
        );

        let mut cycles: u64 = 0;
        loop {
            if *shutdown.borrow() {
                info!("UpdateScheduler: Shutdown requested, stopping");
                break;
            }

            cycles += 1;
            info!(
                "Fetching data at {}",
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );

            match self.run_cycle().await {
                Ok(CycleOutcome::Reported(summary)) => {
                    info!(
                        "Quick Summary: Top Cryptocurrency: {} at {}",
                        summary.top_name,
                        format_usd(summary.top_price)
                    );
                    info!("Quick Summary: Average Price: {}", format_usd(summary.average_price));
                }
                Ok(CycleOutcome::NoData) => {
                    warn!("Cycle {} skipped, no market data", cycles);
                }
                Err(e) => match e.policy() {
                    FailurePolicy::Skip => {
                        error!("Cycle {} skipped: {}", cycles, e);
                    }
                    FailurePolicy::Abort => {
                        error!("Cycle {} failed, stopping scheduler: {}", cycles, e);
                        return Err(e);
                    }
                },
            }

            if self.max_cycles.is_some_and(|max| cycles >= max) {
                info!("UpdateScheduler: Reached {} cycles, stopping", cycles);
                break;
            }

            // A closed channel disables the second branch and leaves the sleep.
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                Ok(()) = shutdown.changed() => {}
            }
        }

        Ok(cycles)
    }
}
