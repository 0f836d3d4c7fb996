use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::cart::core::product::ProductId;
use crate::modules::cart::use_cases::update_product_amount::command::UpdateProductAmount;
use crate::shell::http::failure_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct UpdateProductAmountBody {
    pub amount: i64,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    body: Result<Json<UpdateProductAmountBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    let command = UpdateProductAmount {
        product_id,
        amount: body.amount,
    };

    match state.cart.update_product_amount(command).await {
        Ok(_) => Json(state.cart.cart()).into_response(),
        Err(failure) => failure_response(&failure),
    }
}
