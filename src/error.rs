//! Error types for the coin tracker SDK

use thiserror::Error;

/// Errors that can occur when fetching market data
#[derive(Debug, Error)]
pub enum MarketError {
    /// Transport-level failure, no usable response
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The minimum-interval guard tripped, or the remote returned HTTP 429
    #[error("Rate limited: please wait before making another request")]
    RateLimited,

    /// Non-success status other than rate limiting
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl MarketError {
    /// True when the UI should show the rate-limit message rather than the
    /// generic failure message
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Errors raised by the favorites storage backend
///
/// The relay passes these through unmodified; interpreting
/// [`StoreError::RelationMissing`] as "feature not provisioned yet, treat as
/// empty" is the caller's responsibility.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The favorites relation has not been provisioned in this deployment
    #[error("Favorites relation does not exist")]
    RelationMissing,

    /// Any other backend failure, passed through unmodified
    #[error("Storage error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Deployment-state check, not a business rule: an unprovisioned relation
    /// reads as an empty favorites list
    pub fn is_unprovisioned(&self) -> bool {
        matches!(self, Self::RelationMissing)
    }
}

/// Errors raised by the auth client
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials rejected before reaching the provider
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Password fails the strict policy
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// Password and confirmation differ
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Provider-side failure, passed through unmodified
    #[error("Auth provider error: {0}")]
    Provider(String),
}
