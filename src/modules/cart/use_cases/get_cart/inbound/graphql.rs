use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::cart::core::cart::Cart;
use crate::modules::cart::core::product::CartItem;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlCartItem {
    pub id: i64,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: i64,
}

impl From<CartItem> for GqlCartItem {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.product.id,
            title: item.product.title,
            price: item.product.price,
            image: item.product.image,
            amount: item.amount,
        }
    }
}

pub fn to_gql_cart(cart: Cart) -> Vec<GqlCartItem> {
    cart.into_items().into_iter().map(Into::into).collect()
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn cart(&self, context: &Context<'_>) -> GqlResult<Vec<GqlCartItem>> {
        let state = context.data_unchecked::<AppState>();
        Ok(to_gql_cart(state.cart.cart()))
    }
}
