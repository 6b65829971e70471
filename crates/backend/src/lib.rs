//! Shopfront mock backend.
//!
//! Serves the three endpoints the storefront widget talks to, backed by an
//! in-memory catalog and a single shared cart. Nothing is persisted and there
//! is no authentication; the backend exists so the widget can be driven end
//! to end.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::BackendConfig;
pub use service::{CatalogEntry, CatalogError, ShopService};
pub use state::AppState;

/// Build the application router with tracing and permissive CORS.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
