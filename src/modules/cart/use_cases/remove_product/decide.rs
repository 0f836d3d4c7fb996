use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision};
use crate::modules::cart::core::product::ProductId;

pub fn decide_remove(cart: &Cart, product_id: ProductId) -> Decision {
    if !cart.contains(product_id) {
        return Decision::Rejected {
            reason: DecideError::NotInCart { product_id },
        };
    }
    Decision::Accepted {
        cart: cart.without(product_id),
    }
}
