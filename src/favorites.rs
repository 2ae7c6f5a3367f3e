//! Favorites relay over the hosted row store
//!
//! Each operation is a direct call to the storage backend, translated 1:1
//! with no local logic. The backend owns the data; the client keeps only a
//! transient [`FavoriteSet`] of coin ids for rendering, rebuilt from the last
//! server response.

use crate::error::StoreError;
use crate::types::{Coin, Favorite};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Trait for the hosted favorites store
///
/// Rows are keyed by `(user_id, coin_id)`. A deployment where the relation
/// has not been provisioned yet signals [`StoreError::RelationMissing`].
#[async_trait]
pub trait FavoritesBackend: Send + Sync {
    /// Returns all favorites for a user, newest first
    async fn select_all(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError>;

    /// Inserts a favorite row
    async fn insert(&self, row: Favorite) -> Result<(), StoreError>;

    /// Deletes the row for `(user_id, coin_id)`; deleting an absent row is not
    /// an error
    async fn delete(&self, user_id: &str, coin_id: &str) -> Result<(), StoreError>;

    /// Returns the row for `(user_id, coin_id)` when one exists
    async fn select_one(
        &self,
        user_id: &str,
        coin_id: &str,
    ) -> Result<Option<Favorite>, StoreError>;
}

/// Thin relay in front of a [`FavoritesBackend`]
pub struct FavoritesClient {
    backend: Arc<dyn FavoritesBackend>,
}

impl FavoritesClient {
    pub fn new(backend: Arc<dyn FavoritesBackend>) -> Self {
        Self { backend }
    }

    /// Lists a user's favorites, newest first
    pub async fn list(&self, user_id: &str) -> Result<Vec<Favorite>, StoreError> {
        self.backend.select_all(user_id).await
    }

    /// Favorites a coin, denormalizing its display fields into the row
    pub async fn add(&self, user_id: &str, coin: &Coin) -> Result<(), StoreError> {
        tracing::debug!(user_id, coin_id = %coin.id, "Adding favorite");
        self.backend.insert(Favorite::for_coin(user_id, coin)).await
    }

    /// Un-favorites a coin
    pub async fn remove(&self, user_id: &str, coin_id: &str) -> Result<(), StoreError> {
        tracing::debug!(user_id, coin_id, "Removing favorite");
        self.backend.delete(user_id, coin_id).await
    }

    /// Membership check; an absent row reads as `false`, errors propagate
    pub async fn is_favorite(&self, user_id: &str, coin_id: &str) -> Result<bool, StoreError> {
        Ok(self.backend.select_one(user_id, coin_id).await?.is_some())
    }
}

/// Transient local copy of a user's favorited coin ids
///
/// Rebuilt from [`FavoritesClient::list`] and adjusted on explicit add/remove
/// calls; there is no other local source of truth.
#[derive(Debug, Clone, Default)]
pub struct FavoriteSet {
    ids: HashSet<String>,
}

impl FavoriteSet {
    pub fn from_rows(rows: &[Favorite]) -> Self {
        Self {
            ids: rows.iter().map(|row| row.coin_id.clone()).collect(),
        }
    }

    pub fn contains(&self, coin_id: &str) -> bool {
        self.ids.contains(coin_id)
    }

    pub fn insert(&mut self, coin_id: impl Into<String>) {
        self.ids.insert(coin_id.into());
    }

    pub fn remove(&mut self, coin_id: &str) {
        self.ids.remove(coin_id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
