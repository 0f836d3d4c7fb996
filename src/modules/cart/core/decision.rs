use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::product::{ProductId, Stock};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    #[error("requested amount {requested} of product {product_id} exceeds stock {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    #[error("product {product_id} is already in the cart")]
    AlreadyInCart { product_id: ProductId },

    #[error("amount of product {product_id} cannot grow any further")]
    AmountOverflow { product_id: ProductId },
}

#[derive(Debug, PartialEq)]
pub enum Decision {
    Accepted { cart: Cart },
    Rejected { reason: DecideError },
    Ignored,
}

pub fn ensure_in_stock(stock: &Stock, requested: i64) -> Result<(), DecideError> {
    if requested > stock.amount {
        return Err(DecideError::OutOfStock {
            product_id: stock.id,
            requested,
            available: stock.amount,
        });
    }
    Ok(())
}
