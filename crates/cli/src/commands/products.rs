//! One-shot catalog listing.

use shopfront_storefront::{CatalogQuery, HttpShopApi, ShopApi, WidgetConfig};
use tracing::info;

/// Fetch the catalog once and print one line per product.
///
/// # Errors
///
/// Returns an error if the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn run(
    config: &WidgetConfig,
    q: Option<&str>,
    category: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = HttpShopApi::new(config)?;
    let query = CatalogQuery::filtered(q.unwrap_or_default(), category.unwrap_or_default());

    let products = api.list_products(&query).await?;
    info!(count = products.len(), api = %api.base_url(), "Catalog fetched");

    for product in &products {
        println!(
            "{:>4}  {:<24} {:<12} {:>10}",
            product.id,
            product.name,
            product.category,
            product.price.display()
        );
    }
    Ok(())
}
