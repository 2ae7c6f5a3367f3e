//! Source abstraction for fetching market data from external APIs

use crate::error::MarketError;
use crate::types::{Coin, CoinDetails, TrendingCoin};
use async_trait::async_trait;

/// Trait for market data sources
///
/// Implementations fetch coin listings from a remote REST API
/// (CoinGecko today; others can be added behind the same seam).
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the top `limit` coins ranked by market cap
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<Coin>, MarketError>;

    /// Fetches the detail record for a single coin
    async fn fetch_coin(&self, id: &str) -> Result<CoinDetails, MarketError>;

    /// Fetches the trending search listing
    async fn fetch_trending(&self) -> Result<Vec<TrendingCoin>, MarketError>;

    /// Returns the name of this source
    fn name(&self) -> &'static str;
}
