use crate::domain::market::MarketRecord;
use serde::Serialize;

/// Number of coins listed in the market-cap leaderboard.
pub const TOP_N_BY_MARKET_CAP: usize = 5;

/// Statistics derived from a single cycle's market table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    /// Up to [`TOP_N_BY_MARKET_CAP`] records, market cap descending.
    pub top_by_market_cap: Vec<MarketRecord>,
    pub average_price: f64,
    /// `None` only when no record carries a 24h change.
    pub highest_change: Option<MarketRecord>,
    pub lowest_change: Option<MarketRecord>,
}

/// Console summary printed after a successful cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleSummary {
    pub top_name: String,
    pub top_price: f64,
    pub average_price: f64,
    pub record_count: usize,
}

/// Formats a record as `"<name>: <change>%"`, or `n/a` when absent.
pub fn format_change(record: Option<&MarketRecord>) -> String {
    match record.and_then(|r| r.price_change_percentage_24h.map(|pct| (r, pct))) {
        Some((r, pct)) => format!("{}: {:.2}%", r.name, pct),
        None => "n/a".to_string(),
    }
}

pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_change_includes_name_and_two_decimals() {
        let record = MarketRecord {
            name: "Solana".to_string(),
            symbol: "SOL".to_string(),
            current_price: 150.0,
            market_cap: 1.0,
            total_volume: 1.0,
            price_change_percentage_24h: Some(-3.14159),
        };
        assert_eq!(format_change(Some(&record)), "Solana: -3.14%");
    }

    #[test]
    fn test_format_change_without_value() {
        assert_eq!(format_change(None), "n/a");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(50000.0), "$50000.00");
        assert_eq!(format_usd(0.126), "$0.13");
    }
}
