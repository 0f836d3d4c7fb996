use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;

use crate::modules::cart::application::errors::{CartError, CartErrorKind, CartFailure};
use crate::modules::cart::use_cases::add_product::inbound::http as add_http;
use crate::modules::cart::use_cases::get_cart::inbound::http as get_http;
use crate::modules::cart::use_cases::remove_product::inbound::http as remove_http;
use crate::modules::cart::use_cases::update_product_amount::inbound::http as update_http;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct FailureBody {
    pub message: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cart", get(get_http::handle))
        .route(
            "/cart/products/{id}",
            post(add_http::handle).delete(remove_http::handle),
        )
        .route("/cart/products/{id}/amount", put(update_http::handle))
        .route("/notifications", get(list_notifications))
        .with_state(state)
}

pub fn failure_response(failure: &CartFailure) -> Response {
    let status = match (failure.kind(), &failure.source) {
        (CartErrorKind::OutOfStock, _) => StatusCode::CONFLICT,
        (CartErrorKind::NotInCart, _) => StatusCode::NOT_FOUND,
        (CartErrorKind::Unexpected, CartError::Gateway(_)) => StatusCode::BAD_GATEWAY,
        (CartErrorKind::Unexpected, _) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(FailureBody {
            message: failure.user_message(),
        }),
    )
        .into_response()
}

async fn list_notifications(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.notifications.notifications().await)
}
