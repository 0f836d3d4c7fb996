use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision};
use crate::modules::cart::core::product::{CartItem, CatalogProduct, ProductId};
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;

/// Appends a product the cart does not hold yet, with an amount of one.
///
/// Stock is checked before the product is fetched, so it is not an input here.
pub fn decide_add(cart: &Cart, product: CatalogProduct) -> Decision {
    if cart.contains(product.id) {
        return Decision::Rejected {
            reason: DecideError::AlreadyInCart {
                product_id: product.id,
            },
        };
    }
    Decision::Accepted {
        cart: cart.with_item(CartItem::new(product, 1)),
    }
}

/// The amount update that adding a product already in the cart delegates to.
pub fn decide_increment(cart: &Cart, product_id: ProductId) -> Result<UpdateProductAmount, DecideError> {
    let item = cart
        .find(product_id)
        .ok_or(DecideError::NotInCart { product_id })?;
    let amount = item
        .amount
        .checked_add(1)
        .ok_or(DecideError::AmountOverflow { product_id })?;
    Ok(UpdateProductAmount { product_id, amount })
}
