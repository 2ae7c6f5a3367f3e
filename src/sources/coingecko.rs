//! CoinGecko market data source implementation

use crate::constants::{COINGECKO_API_KEY_ENV, COINGECKO_API_URL, REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::MarketError;
use crate::source::MarketDataSource;
use crate::types::{Coin, CoinDetails, TrendingCoin};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// CoinGecko `/search/trending` response wrapper
#[derive(Debug, Deserialize)]
struct TrendingResponse {
    coins: Vec<TrendingEntry>,
}

#[derive(Debug, Deserialize)]
struct TrendingEntry {
    item: TrendingCoin,
}

/// CoinGecko market data source
///
/// Reads an optional API key from the `COINGECKO_API_KEY` environment
/// variable and sends it as the demo-key header when present.
pub struct CoinGeckoSource {
    client: Client,
    api_key: Option<String>,
}

impl CoinGeckoSource {
    /// Creates a new CoinGecko source
    pub fn new() -> Result<Self, MarketError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(MarketError::Network)?;

        let api_key = std::env::var(COINGECKO_API_KEY_ENV).ok();

        Ok(Self { client, api_key })
    }

    fn markets_url(&self, limit: usize) -> String {
        format!(
            "{COINGECKO_API_URL}/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={limit}&page=1&sparkline=false&locale=en"
        )
    }

    fn coin_url(&self, id: &str) -> String {
        format!(
            "{COINGECKO_API_URL}/coins/{id}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false&sparkline=false"
        )
    }

    /// Issues a GET request and decodes the JSON body
    ///
    /// HTTP 429 maps to [`MarketError::RateLimited`], any other non-success
    /// status to [`MarketError::Http`].
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MarketError> {
        tracing::debug!(url, "Fetching from CoinGecko");

        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }

        let response = request.send().await.map_err(MarketError::Network)?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(MarketError::RateLimited);
        }
        if !status.is_success() {
            return Err(MarketError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(MarketError::Network)?;

        serde_json::from_str(&body).map_err(|e| {
            MarketError::Decode(format!("Failed to parse CoinGecko response: {e}. Body: {body}"))
        })
    }
}

#[async_trait]
impl MarketDataSource for CoinGeckoSource {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<Coin>, MarketError> {
        let coins: Vec<Coin> = self.get_json(&self.markets_url(limit)).await?;

        tracing::debug!(count = coins.len(), "Fetched markets listing from CoinGecko");

        Ok(coins)
    }

    async fn fetch_coin(&self, id: &str) -> Result<CoinDetails, MarketError> {
        self.get_json(&self.coin_url(id)).await
    }

    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, MarketError> {
        let url = format!("{COINGECKO_API_URL}/search/trending");
        let response: TrendingResponse = self.get_json(&url).await?;

        Ok(response.coins.into_iter().map(|entry| entry.item).collect())
    }

    fn name(&self) -> &'static str {
        "coingecko"
    }
}
