//! # Coin Tracker SDK
//!
//! Service core for a cryptocurrency tracking client: market data with a
//! short-lived cache, a favorites relay over a hosted row store, a session
//! layer over a hosted auth service, and the pure validation helpers the auth
//! forms use.
//!
//! ## Market data
//!
//! [`MarketClient`] fetches the ranked coin listing from CoinGecko, serves
//! repeat calls from a short-lived cache, spaces out network attempts, and
//! falls back to the last good listing when a fetch fails:
//!
//! ```no_run
//! use coin_tracker_sdk::MarketClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MarketClient::new()?;
//!
//! let coins = client.get_coins(100).await?;
//! for coin in &coins {
//!     println!("{}: ${:.2}", coin.symbol, coin.current_price);
//! }
//!
//! // Pull-to-refresh: drop the cache so the next call reaches the network.
//! client.clear_cache().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! ```no_run
//! use coin_tracker_sdk::{MarketClient, MarketError};
//!
//! # async fn example(client: &MarketClient) {
//! match client.get_coins(100).await {
//!     Ok(coins) => println!("{} coins", coins.len()),
//!     Err(MarketError::RateLimited) => {
//!         println!("Too many requests, try again in a moment")
//!     }
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! # }
//! ```
//!
//! ## Favorites and sessions
//!
//! [`FavoritesClient`] and [`AuthClient`] are thin relays over the hosted
//! backends, reached through the [`FavoritesBackend`] and [`SessionProvider`]
//! seams. The screen flow (launch, loading, login/register, authenticated) is
//! modeled by [`AuthStage`] with a pure transition function.

pub mod cache;
pub mod client;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod session;
pub mod source;
pub mod sources;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use cache::CacheConfig;
pub use client::MarketClient;
pub use error::{AuthError, MarketError, StoreError};
pub use favorites::{FavoriteSet, FavoritesBackend, FavoritesClient};
pub use session::{AuthClient, AuthEvent, AuthStage, SessionProvider};
pub use source::MarketDataSource;
pub use sources::CoinGeckoSource;
pub use types::{
    AuthUser, Coin, CoinDetails, Credentials, Favorite, RegisterCredentials, SessionChange,
    TrendingCoin,
};
pub use validation::{PasswordIssue, PasswordStrength};
