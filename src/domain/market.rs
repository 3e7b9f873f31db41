//! Market snapshot types.
//!
//! A [`MarketTable`] is rebuilt from scratch every cycle and dropped once the
//! report has been written.

use serde::{Deserialize, Serialize};

/// Raw `/coins/markets` payload as returned by the provider.
pub type RawMarketData = Vec<serde_json::Value>;

/// One cryptocurrency's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub name: String,
    /// Always uppercase (`BTC`, `ETH`).
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    /// `None` when the API reports `null` for a freshly listed coin.
    pub price_change_percentage_24h: Option<f64>,
}

/// Ordered market records, in API response order (market cap descending).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketTable {
    records: Vec<MarketRecord>,
}

impl MarketTable {
    pub fn new(records: Vec<MarketRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row of the table, i.e. the coin the API ranks highest.
    pub fn leader(&self) -> Option<&MarketRecord> {
        self.records.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarketRecord> {
        self.records.iter()
    }
}

impl From<Vec<MarketRecord>> for MarketTable {
    fn from(records: Vec<MarketRecord>) -> Self {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a MarketTable {
    type Item = &'a MarketRecord;
    type IntoIter = std::slice::Iter<'a, MarketRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
