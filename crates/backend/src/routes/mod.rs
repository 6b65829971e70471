//! HTTP route handlers for the mock shop.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /products                - In-stock products (?q=, ?category=, ?id=, ?ids=1,2)
//!
//! # Cart
//! GET  /cart                    - Cart lines
//! POST /cart                    - Add {product_id, quantity}
//!
//! # Checkout
//! POST /checkout                - Place {items: [...]} against the cart
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the API router (without outer middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(products::list))
        .route("/cart", get(cart::show).post(cart::add))
        .route("/checkout", post(checkout::place_order))
}

/// Liveness health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
