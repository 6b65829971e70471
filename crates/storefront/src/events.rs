//! UI events and delegated control bindings.
//!
//! Rendered controls are plain markup carrying `data-action` and
//! `data-product-id`; a single delegated handler turns a click on such a
//! control into a [`UiEvent`] for the controller.

use std::sync::LazyLock;

use regex::Regex;
use shopfront_core::ProductId;

/// Delegated action name for "Add to Cart" buttons.
pub const ADD_TO_CART_ACTION: &str = "add-to-cart";

/// Delegated action name for cart "Remove" buttons.
pub const REMOVE_FROM_CART_ACTION: &str = "remove-from-cart";

/// Regex for extracting delegated control bindings.
static DELEGATED_CONTROL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-action="([a-z-]+)"\s+data-product-id="([^"]*)""#).expect("Invalid regex")
});

/// Everything the shopper can trigger on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The page finished loading.
    Ready,
    /// The search button was pressed.
    Search,
    /// The category filter changed.
    CategoryChanged,
    AddToCart(ProductId),
    RemoveFromCart(ProductId),
    Checkout,
}

impl UiEvent {
    /// Map a delegated click to an event.
    ///
    /// Returns `None` for unknown actions or an unparsable product id.
    #[must_use]
    pub fn from_delegated(action: &str, product_id: &str) -> Option<Self> {
        let product_id = product_id.parse::<ProductId>().ok()?;
        match action {
            ADD_TO_CART_ACTION => Some(Self::AddToCart(product_id)),
            REMOVE_FROM_CART_ACTION => Some(Self::RemoveFromCart(product_id)),
            _ => None,
        }
    }
}

/// Events bound by the delegated controls in `html`, in document order.
#[must_use]
pub fn delegated_events(html: &str) -> Vec<UiEvent> {
    DELEGATED_CONTROL_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let action = caps.get(1)?.as_str();
            let product_id = caps.get(2)?.as_str();
            UiEvent::from_delegated(action, product_id)
        })
        .collect()
}
