//! Constants for the coin tracker SDK
//!
//! All fixed configuration is centralized here. The SDK operates with these
//! compile-time defaults; the two cache durations can additionally be
//! overridden per client instance via [`crate::cache::CacheConfig`].

/// How long a successful markets response is served from cache (in seconds)
pub const CACHE_FRESHNESS_SECS: u64 = 60;

/// Minimum spacing between two network attempts (in milliseconds)
pub const MIN_REQUEST_INTERVAL_MS: u64 = 1000;

/// HTTP request timeout when fetching market data (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default number of market rows to request
pub const DEFAULT_MARKET_LIMIT: usize = 100;

/// Minimum accepted password length
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum accepted password length
pub const PASSWORD_MAX_LEN: usize = 128;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Environment variable holding an optional CoinGecko API key
pub const COINGECKO_API_KEY_ENV: &str = "COINGECKO_API_KEY";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "coin-tracker-sdk/0.1.0";
