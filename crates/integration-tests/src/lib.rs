//! Integration tests for Shopfront.
//!
//! Each test boots the mock backend on an ephemeral port and drives the
//! storefront widget against it over real HTTP.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `backend_api` - Wire format of the mock shop endpoints
//! - `storefront_flow` - Widget controller end to end

use shopfront_backend::{AppState, ShopService};
use shopfront_storefront::{
    CartStore, HeadlessPage, HttpShopApi, StorefrontController, WidgetConfig,
};
use tokio::net::TcpListener;

/// A running mock backend plus a widget wired to it.
pub struct TestContext {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestContext {
    /// Start the seeded backend on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn new() -> Self {
        Self::with_shop(ShopService::seeded()).await
    }

    /// Start the backend over a given shop.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn with_shop(shop: ShopService) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");
        let app = shopfront_backend::router(AppState::new(shop));

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path` on the test backend.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A fresh widget (empty cart, blank inputs) pointed at the backend.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn widget(&self) -> StorefrontController<HttpShopApi, HeadlessPage> {
        let config = WidgetConfig::for_api_url(&self.base_url).expect("Invalid test URL");
        let api = HttpShopApi::new(&config).expect("Failed to build client");
        StorefrontController::new(api, HeadlessPage::new(), CartStore::new())
    }
}
