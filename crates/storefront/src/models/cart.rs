//! Cart domain types.
//!
//! A user owns at most one cart; a product appears in a cart at most once.
//! Both invariants are backed by unique constraints, not application checks.

use chrono::{DateTime, Utc};
use serde::Serialize;

use orchard_core::{CartId, CartLineId, ProductId, UserId};

use super::product::Product;

/// A cart row, without its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Owning user's identity key (unique across carts).
    pub user_id: UserId,
    /// When the cart was first touched.
    pub created_at: DateTime<Utc>,
}

/// One (product, quantity) pairing within a cart, joined with product data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Line ID.
    pub id: CartLineId,
    /// Referenced product ID.
    pub product_id: ProductId,
    /// Positive quantity.
    pub quantity: i32,
    /// Joined product fields for display.
    pub product: Product,
}

/// A cart together with its lines, as returned to the client.
///
/// Removal against a user who never had a cart yields a detached snapshot:
/// just `{"items": []}`, with no cart identifier to target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Cart ID; absent when no cart row exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<CartId>,
    /// Owning user; absent when no cart row exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Cart lines, oldest first.
    pub items: Vec<CartLine>,
}

impl CartSnapshot {
    /// Snapshot for a user with no cart row.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            id: None,
            user_id: None,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use orchard_core::Price;

    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::from("p1"),
            name: "Canvas Tote".to_string(),
            description: "A sturdy tote".to_string(),
            price: Price::from_cents(1999),
            image_url: "https://img.example/p1.jpg".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_detached_snapshot_serializes_to_items_only() {
        let json = serde_json::to_value(CartSnapshot::detached()).unwrap();
        assert_eq!(json, serde_json::json!({ "items": [] }));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = CartSnapshot {
            id: Some(CartId::new(7)),
            user_id: Some(UserId::from("user@example.com")),
            items: vec![CartLine {
                id: CartLineId::new(1),
                product_id: ProductId::from("p1"),
                quantity: 3,
                product: sample_product(),
            }],
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["userId"], "user@example.com");
        assert_eq!(json["items"][0]["productId"], "p1");
        assert_eq!(json["items"][0]["quantity"], 3);
        assert_eq!(json["items"][0]["product"]["imageUrl"], "https://img.example/p1.jpg");
        // Decimal prices travel as strings on the wire
        assert_eq!(json["items"][0]["product"]["price"], "19.99");
    }
}
