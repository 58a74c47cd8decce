//! Product catalog store.
//!
//! Read-only lookup, search, and pagination over catalog products. The cart
//! core treats this as a leaf dependency; nothing here mutates storage.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use orchard_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::product::{Product, ProductPage};

/// Fixed page size for catalog listings.
pub const PAGE_SIZE: u32 = 12;

/// Read-only store for catalog products.
#[derive(Clone)]
pub struct ProductCatalog {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    price: Price,
    image_url: String,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

impl ProductCatalog {
    /// Create a new catalog store over an injected pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Search the catalog, newest first, with offset pagination.
    ///
    /// Case-insensitive substring match over name and description (either
    /// field matching is enough); an empty term matches everything. `page`
    /// is 1-indexed and clamped to at least 1; pages past the end return an
    /// empty list rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn search(&self, term: &str, page: u32) -> Result<ProductPage, RepositoryError> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(PAGE_SIZE);

        let (total, rows) = if term.is_empty() {
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
                .fetch_one(&self.pool)
                .await?;

            let rows = sqlx::query_as::<_, ProductRow>(
                r"
                SELECT id, name, description, price, image_url, created_at
                FROM product
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                ",
            )
            .bind(i64::from(PAGE_SIZE))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, rows)
        } else {
            let pattern = like_pattern(term);

            let total: i64 = sqlx::query_scalar(
                r"
                SELECT COUNT(*) FROM product
                WHERE name ILIKE $1 OR description ILIKE $1
                ",
            )
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

            let rows = sqlx::query_as::<_, ProductRow>(
                r"
                SELECT id, name, description, price, image_url, created_at
                FROM product
                WHERE name ILIKE $1 OR description ILIKE $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                ",
            )
            .bind(&pattern)
            .bind(i64::from(PAGE_SIZE))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

            (total, rows)
        };

        Ok(ProductPage {
            products: rows.into_iter().map(Into::into).collect(),
            page,
            total_pages: total_pages(total, PAGE_SIZE),
        })
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, image_url, created_at
            FROM product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}

/// Build an ILIKE pattern with metacharacters escaped.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Page count for a total: `ceil(total / page_size)`, never below 1.
pub(crate) fn total_pages(total: i64, page_size: u32) -> u32 {
    let page_size = i64::from(page_size);
    let pages = (total + page_size - 1) / page_size;
    u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_empty_catalog_is_one() {
        assert_eq!(total_pages(0, PAGE_SIZE), 1);
    }

    #[test]
    fn test_total_pages_exact_fit() {
        assert_eq!(total_pages(12, PAGE_SIZE), 1);
        assert_eq!(total_pages(24, PAGE_SIZE), 2);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        // 13 products at 12 per page
        assert_eq!(total_pages(13, PAGE_SIZE), 2);
        assert_eq!(total_pages(1, PAGE_SIZE), 1);
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50% off"), "%50\\% off%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }
}
