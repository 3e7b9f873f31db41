//! Maps the raw `/coins/markets` payload onto [`MarketTable`].

use crate::domain::errors::TransformError;
use crate::domain::market::{MarketRecord, MarketTable};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Fields selected from each coin object. Every key must be present; only
/// the 24h change may be `null`.
#[derive(Debug, Deserialize)]
struct CoinMarketEntry {
    name: String,
    symbol: String,
    current_price: f64,
    market_cap: f64,
    total_volume: f64,
    #[serde(deserialize_with = "present_but_nullable")]
    price_change_percentage_24h: Option<f64>,
}

// A custom deserializer disables serde's implicit `None` for missing
// Option fields, so the key stays mandatory.
fn present_but_nullable<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)
}

impl From<CoinMarketEntry> for MarketRecord {
    fn from(entry: CoinMarketEntry) -> Self {
        MarketRecord {
            name: entry.name,
            symbol: entry.symbol.to_uppercase(),
            current_price: entry.current_price,
            market_cap: entry.market_cap,
            total_volume: entry.total_volume,
            price_change_percentage_24h: entry.price_change_percentage_24h,
        }
    }
}

/// Converts provider output into a table.
///
/// `None` ("no data" from a failed fetch) passes through as `Ok(None)`.
/// The first malformed entry fails the whole batch; no partial table is
/// returned.
pub fn transform(raw: Option<&[Value]>) -> Result<Option<MarketTable>, TransformError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let records = raw
        .iter()
        .enumerate()
        .map(|(index, value)| {
            CoinMarketEntry::deserialize(value)
                .map(MarketRecord::from)
                .map_err(|source| TransformError::Malformed { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Transformer: mapped {} market entries", records.len());
    Ok(Some(MarketTable::new(records)))
}
