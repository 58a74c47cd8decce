//! Cart repository for database operations.
//!
//! Owns cart and cart-line persistence. All mutations are single atomic SQL
//! statements keyed on unique constraints; the repository never does a
//! read-then-write, so concurrent requests for the same user combine instead
//! of clobbering each other.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use orchard_core::{CartId, CartLineId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartLine, CartSnapshot};
use crate::models::product::Product;

/// Repository for cart database operations.
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    user_id: UserId,
    created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LineRow {
    id: CartLineId,
    product_id: ProductId,
    quantity: i32,
    product_name: String,
    product_description: String,
    product_price: Price,
    product_image_url: String,
    product_created_at: DateTime<Utc>,
}

impl From<LineRow> for CartLine {
    fn from(row: LineRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id.clone(),
            quantity: row.quantity,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
                price: row.product_price,
                image_url: row.product_image_url,
                created_at: row.product_created_at,
            },
        }
    }
}

impl CartRepository {
    /// Create a new cart repository over an injected pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Return the user's cart, creating it atomically if none exists.
    ///
    /// The upsert is keyed on the unique `cart.user_id` constraint, so a
    /// concurrent first touch by the same user resolves to the winner's row;
    /// neither caller sees a conflict and no duplicate cart is created. This
    /// is also the documented read-causes-write branch: a GET that finds no
    /// cart lands here and leaves a row behind, guaranteeing the client a
    /// cart identifier to target with subsequent writes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user_id: &UserId) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO cart (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Look up the user's cart without creating one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, user_id: &UserId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, user_id, created_at
            FROM cart
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Merge a quantity delta into the line for (cart, product).
    ///
    /// Creates the line with `quantity = delta` if absent, otherwise
    /// atomically increments the existing quantity. The increment happens
    /// inside the upsert, so two concurrent adds of the same product both
    /// land in the final quantity.
    ///
    /// `delta` must be positive; the service layer validates this before
    /// calling. Zero or negative deltas are a caller bug, not a way to
    /// delete lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnknownReference` if the product does not
    /// exist, `RepositoryError::Database` for other failures.
    pub async fn merge_line(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        delta: i32,
    ) -> Result<(), RepositoryError> {
        debug_assert!(delta > 0, "merge_line requires a positive delta");

        sqlx::query(
            r"
            INSERT INTO cart_line (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_line.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(|e| map_product_fk(e, product_id))?;

        Ok(())
    }

    /// Set the absolute quantity for (cart, product).
    ///
    /// Same upsert shape as [`merge_line`](Self::merge_line) but the new
    /// quantity replaces the old one. Used by the quantity-edit path, where
    /// "set to N" is what the user means.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnknownReference` if the product does not
    /// exist, `RepositoryError::Database` for other failures.
    pub async fn set_line(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        debug_assert!(quantity > 0, "set_line requires a positive quantity");

        sqlx::query(
            r"
            INSERT INTO cart_line (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_product_fk(e, product_id))?;

        Ok(())
    }

    /// Delete all lines matching (cart, product).
    ///
    /// Idempotent: removing a product that is not in the cart is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn remove_lines(
        &self,
        cart_id: CartId,
        product_id: &ProductId,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            DELETE FROM cart_line
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Read the user's cart with lines and joined product data.
    ///
    /// Pure read: returns `None` when no cart row exists and never mutates
    /// storage. The create-on-read behavior lives in
    /// [`get_or_create`](Self::get_or_create), which callers compose in front
    /// of this when they want it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn snapshot(&self, user_id: &UserId) -> Result<Option<CartSnapshot>, RepositoryError> {
        let Some(cart) = self.find(user_id).await? else {
            return Ok(None);
        };

        Ok(Some(self.snapshot_of(&cart).await?))
    }

    /// Read the lines of a known cart into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn snapshot_of(&self, cart: &Cart) -> Result<CartSnapshot, RepositoryError> {
        let rows = sqlx::query_as::<_, LineRow>(
            r"
            SELECT l.id, l.product_id, l.quantity,
                   p.name AS product_name,
                   p.description AS product_description,
                   p.price AS product_price,
                   p.image_url AS product_image_url,
                   p.created_at AS product_created_at
            FROM cart_line l
            JOIN product p ON p.id = l.product_id
            WHERE l.cart_id = $1
            ORDER BY l.id
            ",
        )
        .bind(cart.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(CartSnapshot {
            id: Some(cart.id),
            user_id: Some(cart.user_id.clone()),
            items: rows.into_iter().map(Into::into).collect(),
        })
    }
}

/// Translate a foreign-key violation on `cart_line.product_id` into
/// `UnknownReference`; everything else passes through as a database error.
fn map_product_fk(e: sqlx::Error, product_id: &ProductId) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::UnknownReference(format!("product {product_id}"));
    }
    RepositoryError::Database(e)
}
