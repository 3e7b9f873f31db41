//! CoinGecko market data client
//!
//! Fetches one page of `/coins/markets` per call. Failures are logged here
//! and returned as [`FetchError`]; the scheduler decides what a failed fetch
//! means for the cycle.

use crate::config::{ApiEnvConfig, MarketQuery};
use crate::domain::errors::FetchError;
use crate::domain::market::RawMarketData;
use crate::domain::ports::MarketDataProvider;
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest::{Client, Request};
use tracing::{debug, info, warn};

/// Header CoinGecko reads demo API keys from.
pub const API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    query: MarketQuery,
}

impl CoinGeckoClient {
    pub fn new(config: &ApiEnvConfig) -> reqwest::Result<Self> {
        Ok(Self {
            client: HttpClientFactory::create_client(config.request_timeout)?,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            query: config.query.clone(),
        })
    }

    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.base_url)
    }

    /// Builds the `/coins/markets` request without sending it.
    pub fn build_request(&self) -> Result<Request, FetchError> {
        let mut builder = self
            .client
            .get(self.markets_url())
            .query(&self.query.to_params());

        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        builder.build().map_err(|e| FetchError::Transport {
            url: self.markets_url(),
            reason: e.to_string(),
        })
    }

    async fn fetch_once(&self) -> Result<RawMarketData, FetchError> {
        let request = self.build_request()?;
        let url = request.url().to_string();
        debug!("CoinGecko: GET {}", url);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<RawMarketData>()
            .await
            .map_err(|e| FetchError::Decode {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn fetch_markets(&self) -> Result<RawMarketData, FetchError> {
        match self.fetch_once().await {
            Ok(data) => {
                info!("CoinGecko: received {} market entries", data.len());
                Ok(data)
            }
            Err(e) => {
                warn!("Error fetching data: {}", e);
                Err(e)
            }
        }
    }
}
