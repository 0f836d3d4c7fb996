use serde::{Deserialize, Serialize};

pub type ProductId = i64;

/// Product as the catalog describes it. Carries no cart quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

/// One line of the cart: the catalog product plus how many the shopper wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: CatalogProduct,
    pub amount: i64,
}

impl CartItem {
    pub fn new(product: CatalogProduct, amount: i64) -> Self {
        Self { product, amount }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: i64,
}
