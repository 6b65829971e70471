//! Storefront controller.
//!
//! Owns the cart store and drives the page: catalog loads, cart changes, and
//! checkout are each a request/response round trip followed by a re-render.
//!
//! # Behavior
//!
//! - Catalog failures are logged and leave the grid as it was.
//! - Adds are confirmed by the server before the local quantity changes.
//! - Removes are local only; the cart endpoint is not told.
//! - Checkout clears the cart after any response, whatever it says.
//!
//! Nothing is fenced or debounced: overlapping calls each run to completion
//! and the last one to finish renders last.

use shopfront_core::{CartItem, CheckoutReceipt, CheckoutRequest, ProductId};
use tracing::{debug, error, info, instrument, warn};

use crate::api::{CatalogQuery, ShopApi};
use crate::cart::CartStore;
use crate::error::Result;
use crate::events::UiEvent;
use crate::page::Page;
use crate::render::{CartView, EMPTY_CART_HTML, render_cart_summary, render_product_grid};

/// Alert shown when checkout is attempted with nothing in the cart.
pub const EMPTY_CHECKOUT_ALERT: &str = "Cart is empty.";

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing to check out; no request was made.
    EmptyCart,
    /// The order was posted and the server answered.
    Submitted(CheckoutReceipt),
}

/// Drives one storefront page against a shop API.
pub struct StorefrontController<A, P> {
    api: A,
    page: P,
    cart: CartStore,
}

impl<A: ShopApi, P: Page> StorefrontController<A, P> {
    /// Create a controller over an existing cart store.
    pub const fn new(api: A, page: P, cart: CartStore) -> Self {
        Self { api, page, cart }
    }

    pub const fn api(&self) -> &A {
        &self.api
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Route a UI event to its handler.
    ///
    /// # Errors
    ///
    /// Propagates failures of cart and checkout operations. Catalog loads
    /// never fail here; their errors are logged.
    pub async fn dispatch(&self, event: UiEvent) -> Result<()> {
        debug!(?event, "Dispatching UI event");
        match event {
            UiEvent::Ready => self.ready().await,
            UiEvent::Search | UiEvent::CategoryChanged => {
                self.load_products().await;
                Ok(())
            }
            UiEvent::AddToCart(product_id) => self.add_to_cart(product_id).await,
            UiEvent::RemoveFromCart(product_id) => self.remove_from_cart(product_id).await,
            UiEvent::Checkout => self.checkout().await.map(|_| ()),
        }
    }

    /// Page-ready: initial catalog load, then show the (empty) cart panel.
    ///
    /// # Errors
    ///
    /// Returns an error only if the cart panel cannot be rendered.
    pub async fn ready(&self) -> Result<()> {
        self.load_products().await;
        self.render_cart().await
    }

    /// Load the catalog for the current search text and category.
    ///
    /// Returns `true` when the grid was replaced. On any failure the error is
    /// logged and the grid is left untouched.
    #[instrument(skip(self))]
    pub async fn load_products(&self) -> bool {
        let query = CatalogQuery::filtered(&self.page.search_text(), &self.page.selected_category());

        let html = self
            .api
            .list_products(&query)
            .await
            .and_then(|products| render_product_grid(&products));

        match html {
            Ok(html) => {
                self.page.replace_product_grid(&html);
                true
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                false
            }
        }
    }

    /// Add one unit of `product_id`.
    ///
    /// The local quantity only changes once the cart endpoint has answered.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (cart untouched) or if the cart
    /// panel cannot be re-rendered afterwards (quantity already incremented).
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId) -> Result<()> {
        self.api.add_to_cart(&CartItem::single(product_id)).await?;

        let quantity = self.cart.increment(product_id);
        debug!(quantity, "Cart line incremented");

        self.render_cart().await
    }

    /// Drop the line for `product_id` and re-render. Local only.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining lines cannot be hydrated.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<()> {
        if !self.cart.remove(product_id) {
            debug!("Product was not in the cart");
        }
        self.render_cart().await
    }

    /// Re-render the cart panel.
    ///
    /// An empty cart shows the placeholder without any request. Otherwise all
    /// held products are fetched in one batched request and summed.
    ///
    /// # Errors
    ///
    /// Returns an error if hydration, totalling or rendering fails; the panel keeps its
    /// previous content.
    pub async fn render_cart(&self) -> Result<()> {
        let items = self.cart.items();
        if items.is_empty() {
            self.page.replace_cart_content(EMPTY_CART_HTML);
            return Ok(());
        }

        let query = CatalogQuery::by_ids(items.iter().map(|item| item.product_id));
        let products = self
            .api
            .list_products(&query)
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to hydrate cart"))?;

        let cart = CartView::hydrate(&items, &products)
            .inspect_err(|e| warn!(error = %e, "Failed to total cart"))?;
        let html = render_cart_summary(cart)?;
        self.page.replace_cart_content(&html);
        Ok(())
    }

    /// Post the cart as an order.
    ///
    /// With an empty cart this only alerts. Otherwise, once the server has
    /// answered, its message is alerted and the cart is cleared whatever the
    /// message says.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or response parsing fails (cart
    /// untouched, no alert), or if the cleared cart cannot be rendered.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<CheckoutOutcome> {
        let items = self.cart.items();
        if items.is_empty() {
            self.page.alert(EMPTY_CHECKOUT_ALERT);
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let receipt = self.api.checkout(&CheckoutRequest { items }).await?;
        info!(reply = receipt.display_message(), "Checkout answered");

        self.page.alert(receipt.display_message());
        self.cart.clear();
        self.render_cart().await?;

        Ok(CheckoutOutcome::Submitted(receipt))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use reqwest::StatusCode;
    use rust_decimal::Decimal;
    use shopfront_core::{Price, Product};
    use tokio::sync::Notify;

    use super::*;
    use crate::error::WidgetError;
    use crate::events::delegated_events;
    use crate::page::HeadlessPage;

    /// Fake API that serves a fixed catalog and records every request.
    #[derive(Default)]
    struct RecordingApi {
        catalog: Vec<Product>,
        receipt: CheckoutReceipt,
        fail_catalog: AtomicBool,
        fail_cart: AtomicBool,
        fail_checkout: AtomicBool,
        catalog_queries: Mutex<Vec<CatalogQuery>>,
        cart_posts: Mutex<Vec<CartItem>>,
        checkouts: Mutex<Vec<CheckoutRequest>>,
    }

    impl RecordingApi {
        fn with_catalog(catalog: Vec<Product>) -> Self {
            Self {
                catalog,
                receipt: CheckoutReceipt {
                    message: Some("Order successfully placed".to_string()),
                    detail: None,
                },
                ..Self::default()
            }
        }

        fn request_count(&self) -> usize {
            self.catalog_queries.lock().unwrap().len()
                + self.cart_posts.lock().unwrap().len()
                + self.checkouts.lock().unwrap().len()
        }

        fn unavailable() -> WidgetError {
            WidgetError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "down".to_string(),
            }
        }
    }

    impl ShopApi for RecordingApi {
        async fn list_products(&self, query: &CatalogQuery) -> Result<Vec<Product>> {
            self.catalog_queries.lock().unwrap().push(query.clone());
            if self.fail_catalog.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            Ok(self
                .catalog
                .iter()
                .filter(|p| query.ids.is_empty() || query.ids.contains(&p.id))
                .filter(|p| query.category.as_ref().is_none_or(|c| &p.category == c))
                .filter(|p| query.q.as_ref().is_none_or(|q| p.name.contains(q.as_str())))
                .cloned()
                .collect())
        }

        async fn add_to_cart(&self, item: &CartItem) -> Result<()> {
            self.cart_posts.lock().unwrap().push(*item);
            if self.fail_cart.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            Ok(())
        }

        async fn checkout(&self, order: &CheckoutRequest) -> Result<CheckoutReceipt> {
            self.checkouts.lock().unwrap().push(order.clone());
            if self.fail_checkout.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            Ok(self.receipt.clone())
        }
    }

    fn product(id: i64, name: &str, category: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Price::new(price).unwrap(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Inception", "Movies", Decimal::new(10, 0)),
            product(2, "The Matrix", "Movies", Decimal::new(12, 0)),
            product(3, "1984", "Books", Decimal::new(8, 0)),
            product(7, "Half-cent", "Misc", Decimal::new(10_005, 3)),
            product(8, "Flat", "Misc", Decimal::new(5, 0)),
        ]
    }

    fn controller(api: RecordingApi) -> StorefrontController<RecordingApi, HeadlessPage> {
        StorefrontController::new(api, HeadlessPage::new(), CartStore::new())
    }

    #[tokio::test]
    async fn test_load_renders_one_card_per_product() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        assert!(ctl.load_products().await);

        let grid = ctl.page().product_grid();
        assert_eq!(grid.matches("class=\"card\"").count(), 5);
        assert!(grid.contains("$10.01"));
        assert!(grid.contains("$5.00"));
    }

    #[tokio::test]
    async fn test_load_sends_only_non_empty_filters() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.page().set_category("Books");
        ctl.load_products().await;

        let queries = ctl.api().catalog_queries.lock().unwrap().clone();
        assert_eq!(queries, vec![CatalogQuery::filtered("", "Books")]);
        assert_eq!(ctl.page().product_grid().matches("class=\"card\"").count(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_grid() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.load_products().await;
        let before = ctl.page().product_grid();

        ctl.api().fail_catalog.store(true, Ordering::SeqCst);
        ctl.page().set_search_text("matrix");
        assert!(!ctl.load_products().await);

        assert_eq!(ctl.page().product_grid(), before);
        assert_eq!(ctl.page().grid_renders(), 1);
        assert!(ctl.page().alerts().is_empty());
    }

    #[tokio::test]
    async fn test_add_twice_posts_twice_and_counts_two() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(2)).await.unwrap();
        ctl.add_to_cart(ProductId::new(2)).await.unwrap();

        assert_eq!(ctl.cart().quantity(ProductId::new(2)), 2);
        let posts = ctl.api().cart_posts.lock().unwrap().clone();
        assert_eq!(posts, vec![CartItem::single(ProductId::new(2)); 2]);
        assert!(ctl.page().cart_content().contains("The Matrix: 2 &times; $12.00 = $24.00"));
    }

    #[tokio::test]
    async fn test_add_hydrates_with_one_batched_request() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(3)).await.unwrap();
        ctl.add_to_cart(ProductId::new(1)).await.unwrap();

        let queries = ctl.api().catalog_queries.lock().unwrap().clone();
        assert_eq!(
            queries.last(),
            Some(&CatalogQuery::by_ids([ProductId::new(1), ProductId::new(3)]))
        );
    }

    #[tokio::test]
    async fn test_failed_add_leaves_cart_untouched() {
        let api = RecordingApi::with_catalog(catalog());
        api.fail_cart.store(true, Ordering::SeqCst);
        let ctl = controller(api);

        assert!(ctl.add_to_cart(ProductId::new(1)).await.is_err());
        assert!(ctl.cart().is_empty());
        assert_eq!(ctl.page().cart_renders(), 0);
    }

    #[tokio::test]
    async fn test_remove_last_line_shows_placeholder_without_requests() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(1)).await.unwrap();
        let requests_before = ctl.api().request_count();

        ctl.remove_from_cart(ProductId::new(1)).await.unwrap();

        assert!(ctl.cart().is_empty());
        assert_eq!(ctl.page().cart_content(), EMPTY_CART_HTML);
        assert_eq!(ctl.api().request_count(), requests_before);
    }

    #[tokio::test]
    async fn test_empty_checkout_alerts_without_requests() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        let outcome = ctl.checkout().await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::EmptyCart);
        assert_eq!(ctl.page().alerts(), vec![EMPTY_CHECKOUT_ALERT]);
        assert_eq!(ctl.api().request_count(), 0);
    }

    #[tokio::test]
    async fn test_checkout_posts_items_and_clears_cart() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(7)).await.unwrap();
        ctl.add_to_cart(ProductId::new(7)).await.unwrap();

        ctl.checkout().await.unwrap();

        let checkouts = ctl.api().checkouts.lock().unwrap().clone();
        assert_eq!(
            checkouts,
            vec![CheckoutRequest {
                items: vec![CartItem {
                    product_id: ProductId::new(7),
                    quantity: 2,
                }],
            }]
        );
        assert!(ctl.cart().is_empty());
        assert_eq!(ctl.page().cart_content(), EMPTY_CART_HTML);
        assert_eq!(ctl.page().alerts(), vec!["Order successfully placed"]);
    }

    #[tokio::test]
    async fn test_checkout_clears_cart_even_on_rejection() {
        let api = RecordingApi {
            receipt: CheckoutReceipt {
                message: None,
                detail: Some("Insufficient quantity for product 7".to_string()),
            },
            ..RecordingApi::with_catalog(catalog())
        };
        let ctl = controller(api);
        ctl.add_to_cart(ProductId::new(7)).await.unwrap();

        let outcome = ctl.checkout().await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::Submitted(_)));
        assert!(ctl.cart().is_empty());
        assert_eq!(ctl.page().cart_content(), EMPTY_CART_HTML);
        assert_eq!(
            ctl.page().alerts(),
            vec!["Insufficient quantity for product 7"]
        );
    }

    #[tokio::test]
    async fn test_cart_total_rounds_for_display_only() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(7)).await.unwrap();
        ctl.add_to_cart(ProductId::new(7)).await.unwrap();
        ctl.add_to_cart(ProductId::new(8)).await.unwrap();

        let panel = ctl.page().cart_content();
        assert!(panel.contains("Half-cent: 2 &times; $10.01 = $20.01"));
        assert!(panel.contains("<strong>Subtotal: $25.01</strong>"));
    }

    #[tokio::test]
    async fn test_dispatch_delegated_clicks() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.dispatch(UiEvent::Ready).await.unwrap();
        assert_eq!(ctl.page().cart_content(), EMPTY_CART_HTML);

        let grid_events = delegated_events(&ctl.page().product_grid());
        assert_eq!(grid_events.len(), 5);
        let first = grid_events.first().copied().unwrap();
        assert_eq!(first, UiEvent::AddToCart(ProductId::new(1)));
        ctl.dispatch(first).await.unwrap();

        let cart_events = delegated_events(&ctl.page().cart_content());
        assert_eq!(cart_events, vec![UiEvent::RemoveFromCart(ProductId::new(1))]);
        ctl.dispatch(UiEvent::RemoveFromCart(ProductId::new(1)))
            .await
            .unwrap();
        assert!(ctl.cart().is_empty());
    }

    #[tokio::test]
    async fn test_search_event_reads_inputs() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.page().set_search_text("The");
        ctl.dispatch(UiEvent::Search).await.unwrap();

        let grid = ctl.page().product_grid();
        assert!(grid.contains("The Matrix"));
        assert!(!grid.contains("Inception"));
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart_and_stays_silent() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(2)).await.unwrap();
        let panel = ctl.page().cart_content();
        ctl.api().fail_checkout.store(true, Ordering::SeqCst);

        assert!(ctl.checkout().await.is_err());

        assert_eq!(ctl.cart().quantity(ProductId::new(2)), 1);
        assert!(ctl.page().alerts().is_empty());
        assert_eq!(ctl.page().cart_content(), panel);
    }

    #[tokio::test]
    async fn test_failed_hydration_keeps_previous_panel() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        ctl.add_to_cart(ProductId::new(1)).await.unwrap();
        ctl.add_to_cart(ProductId::new(2)).await.unwrap();
        let panel = ctl.page().cart_content();
        let renders = ctl.page().cart_renders();

        ctl.api().fail_catalog.store(true, Ordering::SeqCst);
        assert!(ctl.remove_from_cart(ProductId::new(1)).await.is_err());

        assert_eq!(ctl.page().cart_content(), panel);
        assert_eq!(ctl.page().cart_renders(), renders);
        assert_eq!(ctl.cart().product_ids(), vec![ProductId::new(2)]);
    }

    #[tokio::test]
    async fn test_overflowing_total_keeps_previous_panel() {
        let huge = Price::new(Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0)).unwrap();
        let mut products = catalog();
        products.push(Product {
            id: ProductId::new(9),
            name: "Huge".to_string(),
            category: "Misc".to_string(),
            price: huge,
        });
        let ctl = controller(RecordingApi::with_catalog(products));
        ctl.add_to_cart(ProductId::new(9)).await.unwrap();
        let panel = ctl.page().cart_content();

        let err = ctl.add_to_cart(ProductId::new(9)).await.unwrap_err();

        assert!(matches!(err, WidgetError::Overflow(_)));
        assert_eq!(ctl.cart().quantity(ProductId::new(9)), 2);
        assert_eq!(ctl.page().cart_content(), panel);
    }

    #[tokio::test]
    async fn test_concurrent_adds_both_count() {
        let ctl = controller(RecordingApi::with_catalog(catalog()));
        let id = ProductId::new(3);

        let (first, second) = tokio::join!(ctl.add_to_cart(id), ctl.add_to_cart(id));
        first.unwrap();
        second.unwrap();

        assert_eq!(ctl.cart().quantity(id), 2);
        assert_eq!(ctl.api().cart_posts.lock().unwrap().len(), 2);
        assert!(ctl.page().cart_content().contains("1984: 2 &times; $8.00 = $16.00"));
    }

    /// Catalog fake whose first response waits until the second has been
    /// served.
    struct GatedApi {
        responses: Vec<Vec<Product>>,
        calls: AtomicUsize,
        gate: Notify,
    }

    impl ShopApi for GatedApi {
        async fn list_products(&self, _query: &CatalogQuery) -> Result<Vec<Product>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                self.gate.notified().await;
            } else {
                self.gate.notify_one();
            }
            Ok(self.responses.get(call).cloned().unwrap_or_default())
        }

        async fn add_to_cart(&self, _item: &CartItem) -> Result<()> {
            Ok(())
        }

        async fn checkout(&self, _order: &CheckoutRequest) -> Result<CheckoutReceipt> {
            Ok(CheckoutReceipt::default())
        }
    }

    #[tokio::test]
    async fn test_overlapping_loads_last_finisher_wins() {
        let all = catalog();
        let api = GatedApi {
            responses: vec![all[..1].to_vec(), all[1..2].to_vec()],
            calls: AtomicUsize::new(0),
            gate: Notify::new(),
        };
        let ctl = StorefrontController::new(api, HeadlessPage::new(), CartStore::new());

        let (slow, fast) = tokio::join!(ctl.load_products(), ctl.load_products());
        assert!(slow && fast);

        let grid = ctl.page().product_grid();
        assert_eq!(ctl.page().grid_renders(), 2);
        assert!(grid.contains("Inception"));
        assert!(!grid.contains("The Matrix"));
    }
}
