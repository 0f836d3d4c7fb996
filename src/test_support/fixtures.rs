// Shared test fixtures: catalog products, line items and a cart manager wired to in-memory ports.

use crate::modules::cart::adapters::outbound::cart_snapshot::{CART_STORAGE_KEY, CartSnapshotRepository};
use crate::modules::cart::adapters::outbound::in_memory_catalog::InMemoryCatalog;
use crate::modules::cart::application::cart_manager::{CartManager, CartPorts};
use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::product::{CartItem, CatalogProduct, ProductId};
use crate::shared::infrastructure::key_value_store::in_memory::InMemoryKeyValueStore;
use crate::shared::infrastructure::notifier::in_memory::InMemoryNotifier;
use std::sync::Arc;

pub fn catalog_product(id: ProductId) -> CatalogProduct {
    CatalogProduct {
        id,
        title: format!("Sneaker model {id}"),
        price: 99.9 + id as f64,
        image: format!("https://cdn.example.com/sneakers/{id}.jpg"),
    }
}

pub fn cart_item(id: ProductId, amount: i64) -> CartItem {
    CartItem::new(catalog_product(id), amount)
}

pub struct CartHarness {
    pub manager: Arc<CartManager>,
    pub catalog: Arc<InMemoryCatalog>,
    pub store: Arc<InMemoryKeyValueStore>,
    pub notifier: Arc<InMemoryNotifier>,
}

impl CartHarness {
    pub fn key(&self) -> &'static str {
        CART_STORAGE_KEY
    }
}

pub struct CartHarnessBuilder {
    catalog: InMemoryCatalog,
    items: Vec<CartItem>,
    raw_snapshot: Option<String>,
}

impl Default for CartHarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CartHarnessBuilder {
    pub fn new() -> Self {
        Self {
            catalog: InMemoryCatalog::new(),
            items: Vec::new(),
            raw_snapshot: None,
        }
    }

    pub fn product(mut self, id: ProductId, available: i64) -> Self {
        self.catalog = self.catalog.with_product(catalog_product(id), available);
        self
    }

    pub fn stock_only(mut self, id: ProductId, available: i64) -> Self {
        self.catalog = self.catalog.with_stock_only(id, available);
        self
    }

    pub fn in_cart(mut self, item: CartItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn raw_snapshot(mut self, raw: impl Into<String>) -> Self {
        self.raw_snapshot = Some(raw.into());
        self
    }

    pub async fn build(self) -> CartHarness {
        let snapshot = match self.raw_snapshot {
            Some(raw) => Some(raw),
            None if self.items.is_empty() => None,
            None => Some(
                serde_json::to_string(&Cart::from_items(self.items)).expect("encode failed"),
            ),
        };
        let store = Arc::new(match snapshot {
            Some(raw) => InMemoryKeyValueStore::with_entry(CART_STORAGE_KEY, raw),
            None => InMemoryKeyValueStore::new(),
        });
        let catalog = Arc::new(self.catalog);
        let notifier = Arc::new(InMemoryNotifier::new());

        let manager = CartManager::restore(CartPorts {
            stock: catalog.clone(),
            products: catalog.clone(),
            snapshots: CartSnapshotRepository::new(store.clone(), CART_STORAGE_KEY),
            notifier: notifier.clone(),
        })
        .await
        .expect("restore failed");

        CartHarness {
            manager: Arc::new(manager),
            catalog,
            store,
            notifier,
        }
    }
}
