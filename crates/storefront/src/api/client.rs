//! `reqwest` implementation of the shop API.

use std::sync::Arc;

use reqwest::StatusCode;
use shopfront_core::{CartItem, CheckoutReceipt, CheckoutRequest, Product};
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogQuery, ShopApi};
use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};

/// Longest body excerpt copied into logs and errors.
const BODY_EXCERPT_CHARS: usize = 200;

/// HTTP client for the shop API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpShopApi {
    inner: Arc<HttpShopApiInner>,
}

struct HttpShopApiInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpShopApi {
    /// Create a new client for the configured API origin.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Http` if the underlying client cannot be built.
    pub fn new(config: &WidgetConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpShopApiInner {
                client,
                base_url: config.api_base_url.clone(),
            }),
        })
    }

    /// Origin the endpoint paths are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Resolve an endpoint path against the API origin.
    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// URL of the catalog endpoint for `query`.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Url` if the endpoint cannot be resolved.
    pub fn products_url(&self, query: &CatalogQuery) -> Result<Url> {
        let mut url = self.endpoint("/products")?;
        let pairs = query.query_pairs();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in &pairs {
                serializer.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

impl ShopApi for HttpShopApi {
    #[instrument(skip(self))]
    async fn list_products(&self, query: &CatalogQuery) -> Result<Vec<Product>> {
        let url = self.products_url(query)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog endpoint returned non-success status"
            );
            return Err(WidgetError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse catalog response"
            );
            WidgetError::Parse(e)
        })?;

        debug!(count = products.len(), "Catalog response received");
        Ok(products)
    }

    #[instrument(skip(self), fields(product_id = %item.product_id))]
    async fn add_to_cart(&self, item: &CartItem) -> Result<()> {
        let url = self.endpoint("/cart")?;
        let response = self.inner.client.post(url).json(item).send().await?;
        let status = response.status();

        // The body is not used; any answer counts as confirmation.
        if !status.is_success() {
            tracing::warn!(status = %status, "Cart endpoint returned non-success status");
        }
        Ok(())
    }

    #[instrument(skip(self), fields(lines = order.items.len()))]
    async fn checkout(&self, order: &CheckoutRequest) -> Result<CheckoutReceipt> {
        let url = self.endpoint("/checkout")?;
        let response = self.inner.client.post(url).json(order).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            tracing::warn!(
                status = %status,
                body = %excerpt(&body),
                "Checkout endpoint returned non-OK status"
            );
        }

        let receipt: CheckoutReceipt = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse checkout response"
            );
            WidgetError::Parse(e)
        })?;

        Ok(receipt)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
