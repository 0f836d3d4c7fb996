// Key-value store port: string values under string keys, surviving restarts.
//
// Purpose
// - Give the cart a place to mirror its snapshot without knowing where it lives.
//
// Boundaries
// - Values are opaque strings. Encoding is the caller's concern.

pub mod file;
pub mod in_memory;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store file is not a valid key-value document: {0}")]
    Format(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
