use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::decision::{DecideError, Decision, ensure_in_stock};
use crate::modules::cart::core::product::Stock;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;

/// Sets the amount of a line item already in the cart.
///
/// The stock ceiling is checked before the lower bound: an amount below one is
/// ignored without a rejection, while an amount above stock is rejected.
pub fn decide_update(cart: &Cart, command: &UpdateProductAmount, stock: &Stock) -> Decision {
    if !cart.contains(command.product_id) {
        return Decision::Rejected {
            reason: DecideError::NotInCart {
                product_id: command.product_id,
            },
        };
    }
    if let Err(reason) = ensure_in_stock(stock, command.amount) {
        return Decision::Rejected { reason };
    }
    if command.amount < 1 {
        return Decision::Ignored;
    }
    Decision::Accepted {
        cart: cart.with_amount(command.product_id, command.amount),
    }
}
