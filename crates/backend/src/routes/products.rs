//! Catalog route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shopfront_core::{Product, ProductId};
use tracing::instrument;

use crate::error::{ApiError, Result};
use crate::service::ProductFilter;
use crate::state::AppState;

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub id: Option<String>,
    /// Comma-separated product ids.
    pub ids: Option<String>,
}

impl ProductsQuery {
    /// Build the service filter. Empty parameters are treated as absent;
    /// `ids` wins over `id`.
    fn into_filter(self) -> Result<ProductFilter> {
        let ids = match (non_empty(self.ids), non_empty(self.id)) {
            (Some(ids), _) => Some(parse_ids(&ids)?),
            (None, Some(id)) => Some(vec![parse_id(&id)?]),
            (None, None) => None,
        };

        Ok(ProductFilter {
            category: non_empty(self.category),
            q: non_empty(self.q),
            ids,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_id(raw: &str) -> Result<ProductId> {
    raw.parse::<ProductId>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Parse a comma-separated id list, skipping blank entries.
fn parse_ids(raw: &str) -> Result<Vec<ProductId>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(parse_id)
        .collect()
}

/// List in-stock products.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<Vec<Product>>> {
    let filter = query.into_filter()?;
    let products = state.shop().products(&filter);
    tracing::debug!(count = products.len(), "Listing products");
    Ok(Json(products))
}
