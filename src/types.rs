//! Wire and domain types for the coin tracker SDK

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One row of the CoinGecko `/coins/markets` listing
///
/// Treated as an immutable snapshot from the remote source; the client only
/// relays it. Numeric fields the API may omit or null are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// Icon URI
    pub image: String,
    pub current_price: f64,
    pub market_cap: Option<f64>,
    pub market_cap_rank: Option<u32>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub market_cap_change_24h: Option<f64>,
    pub market_cap_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
    /// All-time high in the quote currency
    pub ath: Option<f64>,
    pub ath_change_percentage: Option<f64>,
    pub ath_date: Option<DateTime<Utc>>,
    /// All-time low in the quote currency
    pub atl: Option<f64>,
    pub atl_change_percentage: Option<f64>,
    pub atl_date: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Icon URIs for a single coin, as returned by the detail endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinImage {
    pub thumb: String,
    pub small: String,
    pub large: String,
}

/// Market figures from the coin detail endpoint, keyed by quote currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinMarketData {
    #[serde(default)]
    pub current_price: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap: HashMap<String, f64>,
    #[serde(default)]
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub high_24h: HashMap<String, f64>,
    #[serde(default)]
    pub low_24h: HashMap<String, f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub max_supply: Option<f64>,
}

/// Response of the single-coin detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetails {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: CoinImage,
    pub market_data: Option<CoinMarketData>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// One entry of the trending search listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Option<u32>,
    /// Small icon URI
    pub thumb: String,
    pub score: Option<i32>,
}

/// A favorited coin, as stored by the hosted backend
///
/// Keyed by `(user_id, coin_id)`; the display fields are denormalized from
/// the [`Coin`] snapshot at the time the favorite was added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: String,
    pub coin_id: String,
    pub coin_symbol: String,
    pub coin_name: String,
    pub coin_icon: String,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    /// Builds the denormalized row for a coin the given user favorites
    pub fn for_coin(user_id: &str, coin: &Coin) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            coin_id: coin.id.clone(),
            coin_symbol: coin.symbol.clone(),
            coin_name: coin.name.clone(),
            coin_icon: coin.image.clone(),
            added_at: Utc::now(),
        }
    }
}

/// An authenticated user, as reported by the session provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Sign-in credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up credentials, including the confirmation field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterCredentials {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Session-change notification emitted by the session provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A session became active for this user
    SignedIn(AuthUser),
    /// The active session ended
    SignedOut,
}
