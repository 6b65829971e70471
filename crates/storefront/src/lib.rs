//! Shopfront storefront widget.
//!
//! Fetches the product catalog, renders filterable product cards, keeps an
//! in-memory cart synced to the cart endpoint, and triggers a mock checkout.
//!
//! # Architecture
//!
//! - [`controller::StorefrontController`] owns the behavior
//! - [`api::ShopApi`] is the seam to the backend (`reqwest` in production)
//! - [`cart::CartStore`] is the injected, page-lifetime cart
//! - [`page::Page`] is the surface inputs are read from and fragments written to
//! - [`render`] turns products and cart lines into Askama-rendered HTML
//! - [`events`] maps delegated clicks to [`events::UiEvent`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::{
//!     CartStore, HeadlessPage, HttpShopApi, StorefrontController, UiEvent, WidgetConfig,
//! };
//!
//! let config = WidgetConfig::from_env()?;
//! let api = HttpShopApi::new(&config)?;
//! let controller = StorefrontController::new(api, HeadlessPage::new(), CartStore::new());
//!
//! controller.dispatch(UiEvent::Ready).await?;
//! controller.dispatch(UiEvent::AddToCart(ProductId::new(1))).await?;
//! controller.dispatch(UiEvent::Checkout).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod page;
pub mod render;

pub use api::{CatalogQuery, HttpShopApi, ShopApi};
pub use cart::CartStore;
pub use config::{ConfigError, WidgetConfig};
pub use controller::{CheckoutOutcome, EMPTY_CHECKOUT_ALERT, StorefrontController};
pub use error::{Result, WidgetError};
pub use events::{UiEvent, delegated_events};
pub use page::{HeadlessPage, Page};
pub use render::EMPTY_CART_HTML;
