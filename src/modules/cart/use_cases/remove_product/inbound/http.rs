use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::modules::cart::core::product::ProductId;
use crate::shell::http::failure_response;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> impl IntoResponse {
    match state.cart.remove_product(product_id).await {
        Ok(_) => Json(state.cart.cart()).into_response(),
        Err(failure) => failure_response(&failure),
    }
}
