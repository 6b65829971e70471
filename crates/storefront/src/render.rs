//! HTML fragments for the product grid and the cart summary.
//!
//! Rendering is a pure function of the data passed in: every call produces
//! the complete fragment, which replaces whatever the page showed before.
//! Controls carry `data-action` / `data-product-id` attributes and are wired
//! through [`crate::events`] rather than inline handlers.

use askama::Template;
use rust_decimal::Decimal;
use shopfront_core::{CartItem, Product, format_money};

use crate::error::{Result, WidgetError};

/// Placeholder shown when the cart holds nothing.
pub const EMPTY_CART_HTML: &str = "<p>Your cart is empty.</p>";

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.display(),
        }
    }
}

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub total_amount: Decimal,
}

impl CartView {
    /// Join cart quantities with hydrated product details.
    ///
    /// Lines follow the order of `products`. A product the cart does not hold
    /// is skipped, as is a cart line whose product was not returned. Totals are
    /// summed exactly and rounded only for display.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Overflow` if a line or the total does not fit in
    /// a decimal.
    pub fn hydrate(items: &[CartItem], products: &[Product]) -> Result<Self> {
        let mut total_amount = Decimal::ZERO;
        let mut lines = Vec::with_capacity(items.len());

        for product in products {
            let Some(item) = items.iter().find(|item| item.product_id == product.id) else {
                continue;
            };
            let line_amount = product
                .price
                .checked_mul(item.quantity)
                .ok_or(WidgetError::Overflow(product.id))?;
            total_amount = total_amount
                .checked_add(line_amount)
                .ok_or(WidgetError::Overflow(product.id))?;
            lines.push(CartLineView {
                id: product.id.to_string(),
                name: product.name.clone(),
                quantity: item.quantity,
                unit_price: product.price.display(),
                line_total: format_money(line_amount),
            });
        }

        Ok(Self {
            lines,
            total: format_money(total_amount),
            total_amount,
        })
    }
}

/// Product grid fragment.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for card in cards %}
<div class="col-md-3">
  <div class="card">
    <div class="card-body">
      <h5 class="card-title">{{ card.name }}</h5>
      <p class="card-text">Category: {{ card.category }}</p>
      <p class="card-price">{{ card.price }}</p>
      <button type="button" class="btn btn-primary" data-action="add-to-cart" data-product-id="{{ card.id }}">Add to Cart</button>
    </div>
  </div>
</div>
{%- endfor %}"#
)]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

/// Cart summary fragment.
#[derive(Template)]
#[template(
    ext = "html",
    source = r#"{% for line in cart.lines %}
<div class="d-flex justify-content-between align-items-center mb-2">
  <div>{{ line.name }}: {{ line.quantity }} &times; {{ line.unit_price }} = {{ line.line_total }}</div>
  <button type="button" class="btn btn-sm btn-danger" data-action="remove-from-cart" data-product-id="{{ line.id }}">Remove</button>
</div>
{%- endfor %}
<div class="mt-3"><strong>Subtotal: {{ cart.total }}</strong></div>"#
)]
pub struct CartSummaryTemplate {
    pub cart: CartView,
}

/// Render one card per product.
///
/// # Errors
///
/// Returns `WidgetError::Render` if the template fails.
pub fn render_product_grid(products: &[Product]) -> Result<String> {
    let template = ProductGridTemplate {
        cards: products.iter().map(ProductCardView::from).collect(),
    };
    Ok(template.render()?)
}

/// Render the cart summary for a hydrated cart.
///
/// # Errors
///
/// Returns `WidgetError::Render` if the template fails.
pub fn render_cart_summary(cart: CartView) -> Result<String> {
    Ok(CartSummaryTemplate { cart }.render()?)
}
