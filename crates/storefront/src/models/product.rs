//! Product domain types.
//!
//! Products are read-only reference data from the cart core's perspective;
//! the catalog is seeded and maintained outside this service.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{Price, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price (non-negative fixed-point decimal).
    pub price: Price,
    /// Image reference.
    pub image_url: String,
    /// When the product was added to the catalog.
    pub created_at: DateTime<Utc>,
}

/// One page of catalog search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page, newest first.
    pub products: Vec<Product>,
    /// 1-indexed page number (clamped to at least 1).
    pub page: u32,
    /// Total page count; at least 1 even for an empty result set.
    pub total_pages: u32,
}
