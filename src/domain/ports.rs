use crate::domain::analysis::AnalysisSummary;
use crate::domain::errors::{FetchError, ReportError};
use crate::domain::market::{MarketTable, RawMarketData};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch one page of coin market data, one attempt, no retry.
    async fn fetch_markets(&self) -> Result<RawMarketData, FetchError>;
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Replace the previous report with this cycle's table and summary.
    async fn write_report(
        &self,
        table: &MarketTable,
        summary: &AnalysisSummary,
    ) -> Result<(), ReportError>;
}
