use crate::domain::analysis::{AnalysisSummary, TOP_N_BY_MARKET_CAP};
use crate::domain::errors::AnalysisError;
use crate::domain::market::{MarketRecord, MarketTable};
use std::cmp::Ordering;

/// Computes the per-cycle statistics for a market table.
///
/// An empty table is rejected with [`AnalysisError::EmptyTable`] since the
/// mean and extremes are undefined.
pub fn analyze(table: &MarketTable) -> Result<AnalysisSummary, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }

    Ok(AnalysisSummary {
        top_by_market_cap: top_by_market_cap(table, TOP_N_BY_MARKET_CAP),
        average_price: average_price(table),
        highest_change: extreme_change(table, Ordering::Greater).cloned(),
        lowest_change: extreme_change(table, Ordering::Less).cloned(),
    })
}

/// Up to `n` records with the largest market cap, descending.
/// `sort_by` is stable, so equal caps keep table order.
pub fn top_by_market_cap(table: &MarketTable, n: usize) -> Vec<MarketRecord> {
    let mut ranked: Vec<&MarketRecord> = table.iter().collect();
    ranked.sort_by(|a, b| {
        b.market_cap
            .partial_cmp(&a.market_cap)
            .unwrap_or(Ordering::Equal)
    });
    ranked.into_iter().take(n).cloned().collect()
}

pub fn average_price(table: &MarketTable) -> f64 {
    let total: f64 = table.iter().map(|r| r.current_price).sum();
    total / table.len() as f64
}

/// First record whose 24h change compares `wanted` against every other.
/// Records without a change value are ignored.
fn extreme_change(table: &MarketTable, wanted: Ordering) -> Option<&MarketRecord> {
    let mut best: Option<(&MarketRecord, f64)> = None;
    for record in table {
        let Some(change) = record.price_change_percentage_24h else {
            continue;
        };
        if change.is_nan() {
            continue;
        }
        let replace = match best {
            None => true,
            Some((_, current)) => change.partial_cmp(&current) == Some(wanted),
        };
        if replace {
            best = Some((record, change));
        }
    }
    best.map(|(record, _)| record)
}
