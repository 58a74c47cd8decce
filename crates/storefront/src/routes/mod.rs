//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Liveness check
//! GET    /health/ready        - Readiness check (pings the database)
//!
//! # Catalog
//! GET    /api/products        - Paginated product search (?q=&page=)
//! GET    /api/products/{id}   - Product detail
//!
//! # Cart (requires auth; keyed purely by caller identity)
//! GET    /api/cart            - Current cart (creates one on first read)
//! POST   /api/cart            - Merge-add a quantity of a product
//! PUT    /api/cart            - Set the absolute quantity of a product
//! DELETE /api/cart            - Remove a product from the cart
//!
//! # Auth handoff (identity verification happens upstream)
//! POST   /api/auth/login      - Establish the session identity
//! POST   /api/auth/logout     - Clear the session identity
//! ```
//!
//! Unrouted methods on routed paths answer 405 via axum's method fallback.

pub mod auth;
pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/cart",
        get(cart::show)
            .post(cart::add)
            .put(cart::set_quantity)
            .delete(cart::remove),
    )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
}

/// Create the auth handoff routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(cart_routes())
            .merge(product_routes())
            .merge(auth_routes()),
    )
}
