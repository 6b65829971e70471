//! Server-side cart route handlers.

use axum::{Json, extract::State};
use shopfront_core::{CartItem, MessageResponse};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Add units of a product to the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(item): Json<CartItem>,
) -> Result<Json<MessageResponse>> {
    let reply = state.shop().add_to_cart(item)?;
    Ok(Json(reply))
}

/// Show the cart lines.
pub async fn show(State(state): State<AppState>) -> Json<Vec<CartItem>> {
    Json(state.shop().view_cart())
}
