//! Cart service: request validation and orchestration atop the repository.
//!
//! Every operation is keyed purely by the caller's identity. No cart ID is
//! ever accepted from the client, so a user cannot reach another user's cart
//! by guessing identifiers.

use core::fmt;

use serde::Deserialize;

use orchard_core::{ProductId, UserId};

use crate::db::{CartRepository, RepositoryError};
use crate::models::cart::CartSnapshot;

/// Largest quantity a single line can hold.
const MAX_QUANTITY: i64 = i32::MAX as i64;

/// Request body for adding to the cart (`POST /api/cart`).
///
/// Adds are cumulative: the quantity is a delta merged into any existing line
/// for the same product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Request body for setting an absolute quantity (`PUT /api/cart`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetItemRequest {
    pub product_id: String,
    pub quantity: i64,
}

/// Request body for removing a product from the cart (`DELETE /api/cart`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemRequest {
    pub product_id: String,
}

/// One field-level problem found while validating a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationIssue {
    /// The offending request field.
    pub field: &'static str,
    /// Human-readable description, surfaced to the client.
    pub message: &'static str,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Join issue messages into the client-facing error string.
#[must_use]
pub fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors from cart service operations.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// Request failed validation; the message lists every issue found.
    #[error("{}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// The referenced product does not exist in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Storage failure underneath the service.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Cart business logic over the injected repository.
#[derive(Clone)]
pub struct CartService {
    repo: CartRepository,
}

impl CartService {
    /// Create a new cart service owning its repository.
    #[must_use]
    pub const fn new(repo: CartRepository) -> Self {
        Self { repo }
    }

    /// Return the caller's cart with lines and product data.
    ///
    /// A first read creates the cart row, so the client always receives a
    /// cart identifier to target with subsequent writes.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` on storage failure.
    pub async fn view_cart(&self, user_id: &UserId) -> Result<CartSnapshot, CartError> {
        let cart = self.repo.get_or_create(user_id).await?;
        Ok(self.repo.snapshot_of(&cart).await?)
    }

    /// Merge `quantity` more of a product into the caller's cart.
    ///
    /// Repeated adds are cumulative: adding 2 then 3 of the same product
    /// leaves a single line with quantity 5.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` for an empty product ID or a quantity
    /// below 1, `CartError::UnknownProduct` if the catalog has no such
    /// product, `CartError::Repository` on storage failure.
    pub async fn add_item(
        &self,
        user_id: &UserId,
        request: &AddItemRequest,
    ) -> Result<CartSnapshot, CartError> {
        let (product_id, quantity) = validate_item(&request.product_id, request.quantity)?;

        let cart = self.repo.get_or_create(user_id).await?;
        self.repo
            .merge_line(cart.id, &product_id, quantity)
            .await
            .map_err(|e| map_unknown_product(e, product_id))?;

        Ok(self.repo.snapshot_of(&cart).await?)
    }

    /// Set the absolute quantity of a product in the caller's cart.
    ///
    /// This is the quantity-edit path: editing a line from 3 to 5 leaves 5,
    /// not 8. Missing lines are created.
    ///
    /// # Errors
    ///
    /// Same error surface as [`add_item`](Self::add_item).
    pub async fn set_item(
        &self,
        user_id: &UserId,
        request: &SetItemRequest,
    ) -> Result<CartSnapshot, CartError> {
        let (product_id, quantity) = validate_item(&request.product_id, request.quantity)?;

        let cart = self.repo.get_or_create(user_id).await?;
        self.repo
            .set_line(cart.id, &product_id, quantity)
            .await
            .map_err(|e| map_unknown_product(e, product_id))?;

        Ok(self.repo.snapshot_of(&cart).await?)
    }

    /// Remove a product from the caller's cart.
    ///
    /// Idempotent: removing a product that is not in the cart succeeds. A
    /// caller who never had a cart gets a detached `{"items": []}` snapshot
    /// back, and no cart row is created.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Validation` for an empty product ID,
    /// `CartError::Repository` on storage failure.
    pub async fn remove_item(
        &self,
        user_id: &UserId,
        request: &RemoveItemRequest,
    ) -> Result<CartSnapshot, CartError> {
        let product_id = validate_product_id(&request.product_id)?;

        let Some(cart) = self.repo.find(user_id).await? else {
            return Ok(CartSnapshot::detached());
        };

        self.repo.remove_lines(cart.id, &product_id).await?;

        // Re-read rather than trusting the pre-delete cart row; another
        // request may have touched other lines in the meantime
        Ok(self
            .repo
            .snapshot(user_id)
            .await?
            .unwrap_or_else(CartSnapshot::detached))
    }
}

/// Validate a (product ID, quantity) pair, collecting every issue.
fn validate_item(
    product_id: &str,
    quantity: i64,
) -> Result<(ProductId, i32), CartError> {
    let mut issues = Vec::new();

    if product_id.is_empty() {
        issues.push(ValidationIssue {
            field: "productId",
            message: "productId must not be empty",
        });
    }

    if quantity < 1 {
        issues.push(ValidationIssue {
            field: "quantity",
            message: "quantity must be an integer of at least 1",
        });
    } else if quantity > MAX_QUANTITY {
        issues.push(ValidationIssue {
            field: "quantity",
            message: "quantity is too large",
        });
    }

    if !issues.is_empty() {
        return Err(CartError::Validation(issues));
    }

    // Bounded by MAX_QUANTITY above, so the conversion cannot fail
    let quantity = i32::try_from(quantity).unwrap_or(i32::MAX);
    Ok((ProductId::from(product_id), quantity))
}

/// Validate a bare product ID.
fn validate_product_id(product_id: &str) -> Result<ProductId, CartError> {
    if product_id.is_empty() {
        return Err(CartError::Validation(vec![ValidationIssue {
            field: "productId",
            message: "productId must not be empty",
        }]));
    }
    Ok(ProductId::from(product_id))
}

/// Translate a dangling product reference into `UnknownProduct`.
fn map_unknown_product(e: RepositoryError, product_id: ProductId) -> CartError {
    match e {
        RepositoryError::UnknownReference(_) => CartError::UnknownProduct(product_id),
        other => CartError::Repository(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_accepts_minimal() {
        let (product_id, quantity) = validate_item("p1", 1).unwrap();
        assert_eq!(product_id.as_str(), "p1");
        assert_eq!(quantity, 1);
    }

    #[test]
    fn test_validate_item_rejects_empty_product_id() {
        let err = validate_item("", 1).unwrap_err();
        let CartError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "productId");
    }

    #[test]
    fn test_validate_item_rejects_zero_quantity() {
        let err = validate_item("p1", 0).unwrap_err();
        let CartError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues[0].field, "quantity");
    }

    #[test]
    fn test_validate_item_rejects_negative_quantity() {
        assert!(validate_item("p1", -3).is_err());
    }

    #[test]
    fn test_validate_item_rejects_oversized_quantity() {
        let err = validate_item("p1", i64::from(i32::MAX) + 1).unwrap_err();
        assert_eq!(err.to_string(), "quantity is too large");
    }

    #[test]
    fn test_validate_item_collects_all_issues() {
        let err = validate_item("", 0).unwrap_err();
        let CartError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_validation_error_message_joins_issues() {
        let err = validate_item("", 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "productId must not be empty, quantity must be an integer of at least 1"
        );
    }

    #[test]
    fn test_validate_product_id_rejects_empty() {
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("p1").is_ok());
    }

    #[test]
    fn test_non_integer_quantity_fails_deserialization() {
        // 1.5 never reaches validate_item; serde rejects it at the boundary
        let result: Result<AddItemRequest, _> =
            serde_json::from_value(serde_json::json!({ "productId": "p1", "quantity": 1.5 }));
        assert!(result.is_err());
    }
}
