//! In-memory cache slot for the markets listing
//!
//! The original design kept the cached listing and the last-fetch timestamp in
//! process-wide mutable state. Here the slot is owned by the client instance
//! and mutex-guarded, so concurrent callers cannot interleave mid-update.

use crate::constants::{CACHE_FRESHNESS_SECS, MIN_REQUEST_INTERVAL_MS};
use crate::error::MarketError;
use crate::types::Coin;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Durations governing the cache slot and the network guard
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Age below which a cached listing is served without a network call
    pub freshness: Duration,
    /// Shortest allowed spacing between two network attempts, independent of
    /// cache freshness
    pub min_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness: Duration::from_secs(CACHE_FRESHNESS_SECS),
            min_interval: Duration::from_millis(MIN_REQUEST_INTERVAL_MS),
        }
    }
}

#[derive(Debug, Default)]
struct SlotState {
    /// Most recent successful listing and when it was fetched
    listing: Option<(Vec<Coin>, Instant)>,
    /// When the last network attempt was made, successful or not
    last_attempt: Option<Instant>,
}

/// Single mutable slot holding the most recently fetched markets listing
pub struct MarketCache {
    config: CacheConfig,
    state: Mutex<SlotState>,
}

impl MarketCache {
    /// Creates an empty cache slot with the given durations
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(SlotState::default()),
        }
    }

    /// Returns the cached listing when it is inside the freshness window
    pub async fn fresh(&self) -> Option<Vec<Coin>> {
        let state = self.state.lock().await;
        match &state.listing {
            Some((coins, fetched_at)) if fetched_at.elapsed() < self.config.freshness => {
                Some(coins.clone())
            }
            _ => None,
        }
    }

    /// Returns the cached listing regardless of age (stale fallback)
    pub async fn any(&self) -> Option<Vec<Coin>> {
        let state = self.state.lock().await;
        state.listing.as_ref().map(|(coins, _)| coins.clone())
    }

    /// Records a network attempt
    ///
    /// Fails with [`MarketError::RateLimited`] when the previous attempt was
    /// less than `min_interval` ago; a rejected attempt does not push the
    /// window forward.
    pub async fn acquire_attempt(&self) -> Result<(), MarketError> {
        let mut state = self.state.lock().await;
        if let Some(last) = state.last_attempt {
            if last.elapsed() < self.config.min_interval {
                return Err(MarketError::RateLimited);
            }
        }
        state.last_attempt = Some(Instant::now());
        Ok(())
    }

    /// Replaces the slot after a successful fetch
    pub async fn store(&self, coins: Vec<Coin>) {
        let mut state = self.state.lock().await;
        state.listing = Some((coins, Instant::now()));
    }

    /// Empties the slot and resets the attempt marker
    ///
    /// Resetting the marker as well means a user-initiated refresh always
    /// reaches the network instead of tripping the interval guard.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.listing = None;
        state.last_attempt = None;
    }
}
