//! In-memory catalog and server-side cart.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use shopfront_core::{CartItem, CheckoutRequest, MessageResponse, Price, Product, ProductId};
use thiserror::Error;

use crate::error::ApiError;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// A catalog entry: a product plus its stock flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Price,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
}

const fn in_stock_default() -> bool {
    true
}

impl CatalogEntry {
    fn new(id: i64, name: &str, category: &str, cents: i64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            price: Price::from_cents(cents).unwrap_or(Price::ZERO),
            in_stock: true,
        }
    }

    fn product(&self) -> Product {
        Product {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
        }
    }
}

/// Filters accepted by the catalog listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub q: Option<String>,
    pub ids: Option<Vec<ProductId>>,
}

/// The shop: a fixed catalog and one shared cart.
#[derive(Debug)]
pub struct ShopService {
    catalog: Vec<CatalogEntry>,
    cart: Mutex<BTreeMap<ProductId, u32>>,
}

impl ShopService {
    /// Create a shop over `catalog` with an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two entries share an id.
    pub fn new(catalog: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for entry in &catalog {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(Self {
            catalog,
            cart: Mutex::new(BTreeMap::new()),
        })
    }

    /// Shop with the built-in seed catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            catalog: seed_catalog(),
            cart: Mutex::new(BTreeMap::new()),
        }
    }

    /// Shop with a catalog read from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Vec<CatalogEntry> = serde_json::from_str(&content)?;
        Self::new(catalog)
    }

    fn cart(&self) -> MutexGuard<'_, BTreeMap<ProductId, u32>> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// In-stock products matching every given filter, in catalog order.
    ///
    /// `category` matches case-insensitively; `q` is a case-insensitive
    /// substring of the name.
    #[must_use]
    pub fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        let category = filter.category.as_deref().map(str::to_lowercase);
        let q = filter.q.as_deref().map(str::to_lowercase);

        self.catalog
            .iter()
            .filter(|entry| entry.in_stock)
            .filter(|entry| {
                category
                    .as_ref()
                    .is_none_or(|c| &entry.category.to_lowercase() == c)
            })
            .filter(|entry| {
                q.as_ref()
                    .is_none_or(|q| entry.name.to_lowercase().contains(q.as_str()))
            })
            .filter(|entry| {
                filter
                    .ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&entry.id))
            })
            .map(CatalogEntry::product)
            .collect()
    }

    /// Add `item.quantity` units to the cart.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown product, `BadRequest` for a zero quantity.
    pub fn add_to_cart(&self, item: CartItem) -> Result<MessageResponse, ApiError> {
        if !self.catalog.iter().any(|entry| entry.id == item.product_id) {
            return Err(ApiError::NotFound("Product not found".to_string()));
        }
        if item.quantity == 0 {
            return Err(ApiError::BadRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let mut cart = self.cart();
        let quantity = cart.entry(item.product_id).or_insert(0);
        *quantity = quantity.saturating_add(item.quantity);
        Ok(MessageResponse::new("Item added to cart"))
    }

    /// Current cart lines, ascending by product id.
    #[must_use]
    pub fn view_cart(&self) -> Vec<CartItem> {
        self.cart()
            .iter()
            .map(|(&product_id, &quantity)| CartItem {
                product_id,
                quantity,
            })
            .collect()
    }

    /// Check out `order` against the cart.
    ///
    /// Every line is validated before anything is taken; lines that reach
    /// zero are removed.
    ///
    /// # Errors
    ///
    /// `BadRequest` if a product is not in the cart or the cart holds fewer
    /// units than requested.
    pub fn checkout(&self, order: &CheckoutRequest) -> Result<MessageResponse, ApiError> {
        let mut requested: BTreeMap<ProductId, u32> = BTreeMap::new();
        for item in &order.items {
            let total = requested.entry(item.product_id).or_insert(0);
            *total = total.saturating_add(item.quantity);
        }

        let mut cart = self.cart();
        for (product_id, wanted) in &requested {
            match cart.get(product_id) {
                None => {
                    return Err(ApiError::BadRequest(format!(
                        "Product {product_id} not in cart"
                    )));
                }
                Some(held) if held < wanted => {
                    return Err(ApiError::BadRequest(format!(
                        "Insufficient quantity for product {product_id}"
                    )));
                }
                Some(_) => {}
            }
        }

        for (product_id, wanted) in requested {
            if let Some(held) = cart.get_mut(&product_id) {
                *held -= wanted;
                if *held == 0 {
                    cart.remove(&product_id);
                }
            }
        }

        Ok(MessageResponse::new("Order successfully placed"))
    }
}

fn seed_catalog() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new(1, "Inception", "Movies", 1000),
        CatalogEntry::new(2, "The Matrix", "Movies", 1200),
        CatalogEntry::new(3, "1984", "Books", 800),
        CatalogEntry::new(4, "The Hobbit", "Books", 1500),
    ]
}
