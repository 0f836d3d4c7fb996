// Ports define what the cart needs from the outside world, without implementing it.
//
// Responsibilities
// - Describe the read-only catalog lookups the cart depends on.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
// - The key-value store and notifier ports are shared and live under shared::infrastructure.

use crate::modules::cart::core::product::{CatalogProduct, ProductId, Stock};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{resource} not found for product {product_id}")]
    NotFound {
        resource: &'static str,
        product_id: ProductId,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait StockGateway: Send + Sync {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, GatewayError>;
}

#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<CatalogProduct, GatewayError>;
}
