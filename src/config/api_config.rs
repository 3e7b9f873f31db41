//! Market data API configuration parsing from environment variables.

use super::{non_blank, parse_or};
use anyhow::Result;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API configuration
#[derive(Debug, Clone)]
pub struct ApiEnvConfig {
    /// Optional demo key; the request is anonymous without it.
    pub api_key: Option<String>,
    /// Base URL without trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub query: MarketQuery,
}

impl Default for ApiEnvConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            query: MarketQuery::default(),
        }
    }
}

impl ApiEnvConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout_secs = parse_or(lookup, "COINGECKO_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            api_key: non_blank(lookup, "COINGECKO_API_KEY"),
            base_url: non_blank(lookup, "COINGECKO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            request_timeout: Duration::from_secs(timeout_secs),
            query: defaults.query,
        })
    }
}

/// Fixed `/coins/markets` query: top 50 by market cap, priced in USD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
}

impl Default for MarketQuery {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            order: "market_cap_desc".to_string(),
            per_page: 50,
            page: 1,
            sparkline: false,
        }
    }
}

impl MarketQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.vs_currency.clone()),
            ("order", self.order.clone()),
            ("per_page", self.per_page.to_string()),
            ("page", self.page.to_string()),
            ("sparkline", self.sparkline.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_query_params() {
        let params = MarketQuery::default().to_params();
        assert_eq!(
            params,
            vec![
                ("vs_currency", "usd".to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", "50".to_string()),
                ("page", "1".to_string()),
                ("sparkline", "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = ApiEnvConfig::from_lookup(&|key: &str| {
            (key == "COINGECKO_API_KEY").then(|| "   ".to_string())
        })
        .unwrap();
        assert!(config.api_key.is_none());
    }
}
