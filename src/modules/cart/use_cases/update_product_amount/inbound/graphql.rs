use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::cart::use_cases::get_cart::inbound::graphql::{GqlCartItem, to_gql_cart};
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct UpdateProductAmountMutation;

#[Object]
impl UpdateProductAmountMutation {
    async fn update_product_amount(
        &self,
        context: &Context<'_>,
        product_id: i64,
        amount: i64,
    ) -> GqlResult<Vec<GqlCartItem>> {
        let state = context.data_unchecked::<AppState>();
        state
            .cart
            .update_product_amount(UpdateProductAmount { product_id, amount })
            .await
            .map_err(|failure| async_graphql::Error::new(failure.user_message()))?;
        Ok(to_gql_cart(state.cart.cart()))
    }
}
