// In memory implementation of the StockGateway and ProductGateway ports.
//
// Purpose
// - Support cart manager tests and local development without the catalog API.

use crate::modules::cart::core::ports::{GatewayError, ProductGateway, StockGateway};
use crate::modules::cart::core::product::{CatalogProduct, ProductId, Stock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, CatalogProduct>>,
    stock: RwLock<HashMap<ProductId, Stock>>,
    offline: AtomicBool,
    stock_lookups: AtomicUsize,
    product_lookups: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: CatalogProduct, available: i64) -> Self {
        let id = product.id;
        self.stock.get_mut().insert(id, Stock { id, amount: available });
        self.products.get_mut().insert(id, product);
        self
    }

    /// Stock without a catalog entry, to exercise a failing product lookup.
    pub fn with_stock_only(mut self, id: ProductId, available: i64) -> Self {
        self.stock.get_mut().insert(id, Stock { id, amount: available });
        self
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn stock_lookups(&self) -> usize {
        self.stock_lookups.load(Ordering::SeqCst)
    }

    pub fn product_lookups(&self) -> usize {
        self.product_lookups.load(Ordering::SeqCst)
    }

    fn ensure_online(&self) -> Result<(), GatewayError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("Catalog offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StockGateway for InMemoryCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, GatewayError> {
        self.stock_lookups.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        self.stock
            .read()
            .await
            .get(&product_id)
            .copied()
            .ok_or(GatewayError::NotFound {
                resource: "stock",
                product_id,
            })
    }
}

#[async_trait::async_trait]
impl ProductGateway for InMemoryCatalog {
    async fn product(&self, product_id: ProductId) -> Result<CatalogProduct, GatewayError> {
        self.product_lookups.fetch_add(1, Ordering::SeqCst);
        self.ensure_online()?;
        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(GatewayError::NotFound {
                resource: "product",
                product_id,
            })
    }
}
