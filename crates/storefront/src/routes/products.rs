//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use orchard_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::product::{Product, ProductPage};
use crate::state::AppState;

/// Catalog query parameters.
///
/// `page` is accepted as a raw string and parsed leniently: garbage or
/// missing values fall back to page 1 rather than erroring.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Search term; empty or absent matches everything.
    pub q: Option<String>,
    /// 1-indexed page number.
    pub page: Option<String>,
}

impl CatalogQuery {
    fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

/// `GET /api/products` - paginated catalog search.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ProductPage>> {
    let term = query.q.as_deref().unwrap_or("");
    let page = state.catalog().search(term, query.page_number()).await?;
    Ok(Json(page))
}

/// `GET /api/products/{id}` - product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let product_id = ProductId::from(id.as_str());
    let product = state
        .catalog()
        .get(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}
