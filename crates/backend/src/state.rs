//! Application state shared across handlers.

use std::sync::Arc;

use crate::service::ShopService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<ShopService>,
}

impl AppState {
    #[must_use]
    pub fn new(shop: ShopService) -> Self {
        Self {
            inner: Arc::new(shop),
        }
    }

    /// Get a reference to the shop.
    #[must_use]
    pub fn shop(&self) -> &ShopService {
        &self.inner
    }
}
