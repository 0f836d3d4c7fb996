// Reads and writes the whole cart under one key of the key-value store.
//
// Responsibilities
// - Encode the cart as a JSON array of line items.
// - Tell a missing snapshot (empty cart) apart from a corrupt one. A store document that
//   cannot be parsed counts as a corrupt snapshot.

use crate::modules::cart::core::cart::Cart;
use crate::shared::infrastructure::key_value_store::{KeyValueStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("persisted cart is corrupt: {0}")]
    CorruptState(#[source] serde_json::Error),

    #[error("cart could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct CartSnapshotRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl CartSnapshotRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn load(&self) -> Result<Cart, SnapshotError> {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).map_err(SnapshotError::CorruptState),
            Ok(None) => Ok(Cart::default()),
            Err(StoreError::Format(error)) => Err(SnapshotError::CorruptState(error)),
            Err(error) => Err(error.into()),
        }
    }

    pub async fn save(&self, cart: &Cart) -> Result<(), SnapshotError> {
        let raw = serde_json::to_string(cart).map_err(SnapshotError::Encode)?;
        self.store.set(&self.key, &raw).await?;
        Ok(())
    }
}
