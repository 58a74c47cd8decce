//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{CartRepository, ProductCatalog};
use crate::services::CartService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration. The cart
/// service and catalog are constructed once here with the injected pool;
/// nothing in the codebase reaches for a global connection handle.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    cart: CartService,
    catalog: ProductCatalog,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `pool` - `PostgreSQL` connection pool
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let cart = CartService::new(CartRepository::new(pool.clone()));
        let catalog = ProductCatalog::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                cart,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the product catalog store.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }
}
