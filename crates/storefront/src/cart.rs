//! Client-side cart store.
//!
//! The store maps product ids to quantities. A quantity is always at least
//! one: an id is either present with a positive count or absent entirely.
//! Lines iterate in ascending product-id order.
//!
//! `CartStore` is cheaply cloneable; clones share the same lines, so the
//! store handed to a controller can also be inspected by its owner.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::{CartItem, ProductId};

/// Shared, in-memory cart for one page session.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Arc<Mutex<BTreeMap<ProductId, u32>>>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ProductId, u32>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add one unit of `product_id` and return the new quantity.
    pub fn increment(&self, product_id: ProductId) -> u32 {
        let mut lines = self.lock();
        let quantity = lines.entry(product_id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Drop the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&self, product_id: ProductId) -> bool {
        self.lock().remove(&product_id).is_some()
    }

    /// Remove every line.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Quantity held for `product_id` (zero when absent).
    #[must_use]
    pub fn quantity(&self, product_id: ProductId) -> u32 {
        self.lock().get(&product_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of distinct products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Ids of every held product, ascending.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lock().keys().copied().collect()
    }

    /// Snapshot of the cart as checkout lines, ascending by product id.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock()
            .iter()
            .map(|(&product_id, &quantity)| CartItem {
                product_id,
                quantity,
            })
            .collect()
    }
}
