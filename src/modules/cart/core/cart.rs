use crate::modules::cart::core::product::{CartItem, ProductId};
use serde::{Deserialize, Serialize};

/// Ordered line items, at most one per product id.
///
/// Every transition returns a new cart so callers can validate and persist
/// before replacing what they hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    pub fn with_item(&self, item: CartItem) -> Cart {
        let mut items = self.items.clone();
        items.push(item);
        Cart { items }
    }

    pub fn with_amount(&self, product_id: ProductId, amount: i64) -> Cart {
        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id() == product_id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Cart { items }
    }

    pub fn without(&self, product_id: ProductId) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|item| item.id() != product_id)
            .cloned()
            .collect();
        Cart { items }
    }
}
