//! Cart route handlers.
//!
//! Thin dispatch onto the cart service: the handlers authenticate, parse the
//! body, and hand off. Every response is the refreshed cart snapshot, so the
//! client never has to re-fetch after a write.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::cart::CartSnapshot;
use crate::services::cart::{AddItemRequest, RemoveItemRequest, SetItemRequest};
use crate::state::AppState;

/// Unwrap a JSON body, mapping malformed input to a 400 before the service
/// sees it. Non-integer quantities (e.g. 1.5) are rejected here.
fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    Ok(request)
}

/// `GET /api/cart` - return the caller's cart.
///
/// A first read creates the cart, so the response always carries a cart ID.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<Json<CartSnapshot>> {
    let snapshot = state.cart().view_cart(&user.id).await?;
    Ok(Json(snapshot))
}

/// `POST /api/cart` - merge-add a quantity of a product.
///
/// Cumulative: posting quantity 2 then 3 for the same product leaves one
/// line with quantity 5.
#[instrument(skip(state, user, body))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    body: std::result::Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = parse_body(body)?;
    let snapshot = state.cart().add_item(&user.id, &request).await?;
    Ok(Json(snapshot))
}

/// `PUT /api/cart` - set the absolute quantity of a product.
///
/// The quantity-edit path: editing 3 to 5 leaves 5, not 8.
#[instrument(skip(state, user, body))]
pub async fn set_quantity(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    body: std::result::Result<Json<SetItemRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = parse_body(body)?;
    let snapshot = state.cart().set_item(&user.id, &request).await?;
    Ok(Json(snapshot))
}

/// `DELETE /api/cart` - remove a product from the cart.
///
/// Idempotent; a caller with no cart gets `{"items": []}` back.
#[instrument(skip(state, user, body))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    body: std::result::Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Result<Json<CartSnapshot>> {
    let request = parse_body(body)?;
    let snapshot = state.cart().remove_item(&user.id, &request).await?;
    Ok(Json(snapshot))
}
