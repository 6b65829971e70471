//! Shop API seam.
//!
//! # Endpoints
//!
//! ```text
//! GET  /products?q=<text>&category=<name>   - Filtered catalog
//! GET  /products?ids=<id,id,...>            - Batched lookup for cart hydration
//! POST /cart      {product_id, quantity}    - Record an add (response body unused)
//! POST /checkout  {items: [...]}            - Mock checkout, answers {message}
//! ```
//!
//! The controller only depends on [`ShopApi`]; [`HttpShopApi`] is the
//! `reqwest` implementation used outside of tests.

mod client;

use std::future::Future;

use shopfront_core::{CartItem, CheckoutReceipt, CheckoutRequest, Product, ProductId};

use crate::error::Result;

pub use client::HttpShopApi;

/// Operations the storefront widget needs from the shop backend.
pub trait ShopApi: Send + Sync {
    /// Fetch the products matching `query`.
    fn list_products(&self, query: &CatalogQuery)
    -> impl Future<Output = Result<Vec<Product>>> + Send;

    /// Post a cart line. Resolves once any HTTP response has arrived.
    fn add_to_cart(&self, item: &CartItem) -> impl Future<Output = Result<()>> + Send;

    /// Post the order and return whatever the server said about it.
    fn checkout(&self, order: &CheckoutRequest)
    -> impl Future<Output = Result<CheckoutReceipt>> + Send;
}

/// Query parameters for the catalog endpoint.
///
/// Empty search text or category are dropped rather than sent as empty
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub ids: Vec<ProductId>,
}

impl CatalogQuery {
    /// Query built from the search box and category filter.
    #[must_use]
    pub fn filtered(search_text: &str, category: &str) -> Self {
        Self {
            q: non_empty(search_text),
            category: non_empty(category),
            ids: Vec::new(),
        }
    }

    /// Batched lookup of specific products.
    #[must_use]
    pub fn by_ids(ids: impl IntoIterator<Item = ProductId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Key/value pairs in the order they are appended to the URL.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if !self.ids.is_empty() {
            let joined = self
                .ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("ids", joined));
        }
        pairs
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
