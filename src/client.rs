//! Market data client with caching, throttling and stale fallback
//!
//! Provides the current coin listing to the UI while minimizing redundant
//! network calls and degrading gracefully under failure:
//!
//! 1. a listing fetched less than the freshness window ago is served from
//!    cache without touching the network;
//! 2. otherwise a minimum spacing between network attempts is enforced, and a
//!    call inside that spacing fails with [`MarketError::RateLimited`] without
//!    reaching the network (this guards against caller retry storms, not
//!    against the remote's own limits);
//! 3. a successful fetch replaces the cache slot;
//! 4. a failed fetch falls back to the cached listing, however stale, so the
//!    UI is never left empty; with no cached listing the error propagates.
//!
//! The interval guard is checked before the stale fallback, so a throttled
//! call errors even when a stale listing exists. Callers always receive a
//! whole listing or an explicit error, never partial data.

use crate::cache::{CacheConfig, MarketCache};
use crate::error::MarketError;
use crate::source::MarketDataSource;
use crate::sources::CoinGeckoSource;
use crate::types::{Coin, CoinDetails, TrendingCoin};
use std::sync::Arc;

/// Market data client
///
/// Owns its cache slot; two clients never share cached state.
pub struct MarketClient {
    source: Arc<dyn MarketDataSource>,
    cache: MarketCache,
}

impl MarketClient {
    /// Creates a client backed by CoinGecko with the default cache durations
    pub fn new() -> Result<Self, MarketError> {
        Ok(Self::with_source(
            Arc::new(CoinGeckoSource::new()?),
            CacheConfig::default(),
        ))
    }

    /// Creates a client with a custom source and cache durations
    ///
    /// This is also the injection point for mock sources in tests.
    pub fn with_source(source: Arc<dyn MarketDataSource>, config: CacheConfig) -> Self {
        Self {
            source,
            cache: MarketCache::new(config),
        }
    }

    /// Returns the top `limit` coins ranked by market cap
    ///
    /// Serves from cache inside the freshness window, otherwise fetches and
    /// replaces the slot. On a fetch failure the stale listing is returned
    /// when one exists.
    pub async fn get_coins(&self, limit: usize) -> Result<Vec<Coin>, MarketError> {
        if let Some(cached) = self.cache.fresh().await {
            tracing::debug!(
                count = cached.len().min(limit),
                "Serving coin listing from cache"
            );
            return Ok(truncated(cached, limit));
        }

        self.cache.acquire_attempt().await?;

        match self.source.fetch_markets(limit).await {
            Ok(coins) => {
                self.cache.store(coins.clone()).await;
                tracing::debug!(
                    count = coins.len(),
                    source = self.source.name(),
                    "Fetched fresh coin listing"
                );
                Ok(truncated(coins, limit))
            }
            Err(e) => match self.cache.any().await {
                Some(stale) => {
                    tracing::warn!(error = %e, "Markets fetch failed, serving stale listing");
                    Ok(truncated(stale, limit))
                }
                None => Err(e),
            },
        }
    }

    /// Fetches the detail record for a single coin
    ///
    /// No caching; the interval guard still applies, and errors propagate as
    /// from a bare network call.
    pub async fn get_coin_details(&self, id: &str) -> Result<CoinDetails, MarketError> {
        self.cache.acquire_attempt().await?;
        self.source.fetch_coin(id).await
    }

    /// Fetches the trending search listing, uncached
    pub async fn get_trending(&self) -> Result<Vec<TrendingCoin>, MarketError> {
        self.cache.acquire_attempt().await?;
        self.source.fetch_trending().await
    }

    /// Empties the cache slot and resets the interval guard
    ///
    /// Called before a user-initiated refresh so the refresh always reaches
    /// the network.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Returns the name of the underlying source
    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

fn truncated(mut coins: Vec<Coin>, limit: usize) -> Vec<Coin> {
    coins.truncate(limit);
    coins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::mock::{MockFailure, MockSource};
    use std::time::Duration;

    fn coins(n: usize) -> Vec<Coin> {
        (0..n)
            .map(|i| Coin {
                id: format!("coin-{i}"),
                symbol: format!("c{i}"),
                name: format!("Coin {i}"),
                current_price: 100.0 + i as f64,
                ..Coin::default()
            })
            .collect()
    }

    fn client(source: Arc<MockSource>, freshness: Duration, min_interval: Duration) -> MarketClient {
        MarketClient::with_source(
            source,
            CacheConfig {
                freshness,
                min_interval,
            },
        )
    }

    #[tokio::test]
    async fn fresh_cache_serves_without_network_call() {
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(5));
        let client = client(source.clone(), Duration::from_secs(60), Duration::ZERO);

        let first = client.get_coins(5).await.unwrap();
        let second = client.get_coins(3).await.unwrap();

        assert_eq!(source.call_count(), 1);
        assert_eq!(second.len(), 3);
        assert_eq!(second[0].id, first[0].id);
    }

    #[tokio::test]
    async fn interval_guard_trips_without_network_call() {
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(2));
        let client = client(source.clone(), Duration::ZERO, Duration::from_secs(60));

        client.get_coins(2).await.unwrap();
        let err = client.get_coins(2).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn guard_errors_even_when_stale_listing_exists() {
        // Stricter behavior on purpose: the stale fallback only applies to
        // network failures, never to the interval guard.
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(2));
        let client = client(source.clone(), Duration::ZERO, Duration::from_secs(60));

        client.get_coins(2).await.unwrap();
        assert!(matches!(
            client.get_coins(2).await,
            Err(MarketError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn fetch_failure_falls_back_to_stale_listing() {
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(4));
        let client = client(source.clone(), Duration::ZERO, Duration::ZERO);

        client.get_coins(4).await.unwrap();
        source.set_failure(MockFailure::Http(500));

        let fallback = client.get_coins(2).await.unwrap();
        assert_eq!(fallback.len(), 2);
        assert_eq!(fallback[0].id, "coin-0");
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn remote_rate_limit_also_falls_back_to_stale_listing() {
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(2));
        let client = client(source.clone(), Duration::ZERO, Duration::ZERO);

        client.get_coins(2).await.unwrap();
        source.set_failure(MockFailure::RateLimited);

        assert_eq!(client.get_coins(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_without_cache_propagates() {
        let source = Arc::new(MockSource::new());
        source.set_failure(MockFailure::Http(502));
        let client = client(source.clone(), Duration::from_secs(60), Duration::ZERO);

        assert!(matches!(
            client.get_coins(10).await,
            Err(MarketError::Http { status: 502 })
        ));
    }

    #[tokio::test]
    async fn clear_cache_forces_network_call() {
        let source = Arc::new(MockSource::new());
        source.set_markets(coins(3));
        // Non-zero interval on purpose: clear_cache must also reset the guard.
        let client = client(
            source.clone(),
            Duration::from_secs(60),
            Duration::from_secs(60),
        );

        client.get_coins(3).await.unwrap();
        client.clear_cache().await;
        client.get_coins(3).await.unwrap();

        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test]
    async fn details_are_uncached_but_guarded() {
        let source = Arc::new(MockSource::new());
        source.set_details(CoinDetails {
            id: "bitcoin".into(),
            symbol: "btc".into(),
            name: "Bitcoin".into(),
            image: Default::default(),
            market_data: None,
            last_updated: None,
        });
        let client = client(source.clone(), Duration::ZERO, Duration::from_secs(60));

        let details = client.get_coin_details("bitcoin").await.unwrap();
        assert_eq!(details.id, "bitcoin");

        assert!(matches!(
            client.get_coin_details("bitcoin").await,
            Err(MarketError::RateLimited)
        ));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn trending_relays_source_listing() {
        let source = Arc::new(MockSource::new());
        source.set_trending(vec![TrendingCoin {
            id: "pepe".into(),
            name: "Pepe".into(),
            symbol: "PEPE".into(),
            market_cap_rank: Some(40),
            thumb: String::new(),
            score: Some(0),
        }]);
        let client = client(source.clone(), Duration::ZERO, Duration::ZERO);

        let trending = client.get_trending().await.unwrap();
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].id, "pepe");
    }
}
