//! Mock checkout route handler.

use axum::{Json, extract::State};
use shopfront_core::{CheckoutRequest, MessageResponse};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Place an order against the cart. No payment is taken.
#[instrument(skip(state), fields(lines = order.items.len()))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(order): Json<CheckoutRequest>,
) -> Result<Json<MessageResponse>> {
    let reply = state.shop().checkout(&order)?;
    tracing::info!("Order placed");
    Ok(Json(reply))
}
