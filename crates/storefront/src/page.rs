//! The page surface the controller reads from and renders into.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Input controls, fragment slots, and the alert channel of a storefront page.
pub trait Page: Send + Sync {
    /// Current text of the search box.
    fn search_text(&self) -> String;

    /// Currently selected category; empty means "all categories".
    fn selected_category(&self) -> String;

    /// Replace the whole product grid with `html`.
    fn replace_product_grid(&self, html: &str);

    /// Replace the whole cart panel with `html`.
    fn replace_cart_content(&self, html: &str);

    /// Show a blocking message to the shopper.
    fn alert(&self, message: &str);
}

/// In-memory page: inputs are set directly, outputs are recorded.
///
/// Used by the terminal session and by tests.
#[derive(Debug, Default)]
pub struct HeadlessPage {
    state: Mutex<HeadlessState>,
}

#[derive(Debug, Default)]
struct HeadlessState {
    search_text: String,
    category: String,
    product_grid: String,
    cart_content: String,
    alerts: Vec<String>,
    grid_renders: usize,
    cart_renders: usize,
}

impl HeadlessPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        self.state().search_text = text.into();
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.state().category = category.into();
    }

    /// Current product grid markup.
    #[must_use]
    pub fn product_grid(&self) -> String {
        self.state().product_grid.clone()
    }

    /// Current cart panel markup.
    #[must_use]
    pub fn cart_content(&self) -> String {
        self.state().cart_content.clone()
    }

    /// Every alert shown so far, oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.state().alerts.clone()
    }

    /// Remove and return the alerts shown since the last call.
    pub fn take_alerts(&self) -> Vec<String> {
        std::mem::take(&mut self.state().alerts)
    }

    /// How many times the grid has been replaced.
    #[must_use]
    pub fn grid_renders(&self) -> usize {
        self.state().grid_renders
    }

    /// How many times the cart panel has been replaced.
    #[must_use]
    pub fn cart_renders(&self) -> usize {
        self.state().cart_renders
    }
}

impl Page for HeadlessPage {
    fn search_text(&self) -> String {
        self.state().search_text.clone()
    }

    fn selected_category(&self) -> String {
        self.state().category.clone()
    }

    fn replace_product_grid(&self, html: &str) {
        let mut state = self.state();
        html.clone_into(&mut state.product_grid);
        state.grid_renders += 1;
    }

    fn replace_cart_content(&self, html: &str) {
        let mut state = self.state();
        html.clone_into(&mut state.cart_content);
        state.cart_renders += 1;
    }

    fn alert(&self, message: &str) {
        tracing::info!(alert = message, "Alert shown");
        self.state().alerts.push(message.to_string());
    }
}
