//! Integration test support for Orchard.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL and the storefront
//! docker compose up -d db
//! cargo run -p orchard-storefront &
//!
//! # Run integration tests
//! cargo test -p orchard-integration-tests -- --ignored
//! ```
//!
//! Tests are `#[ignore]`d by default because they need a running storefront
//! server and database. Each test logs in as a freshly generated user so
//! carts never collide across tests or runs.

use reqwest::Client;
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Database URL for direct seeding (configurable via environment).
#[must_use]
pub fn database_url() -> String {
    std::env::var("STOREFRONT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .unwrap_or_else(|_| "postgres://localhost/orchard_storefront".to_string())
}

/// Shared handles for one test: an HTTP client with a cookie store and a
/// direct database connection for seeding catalog rows.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the running stack.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built or the database is unreachable.
    pub async fn new() -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url())
            .await
            .expect("Failed to connect to database");

        Self {
            client,
            base_url: base_url(),
            pool,
        }
    }

    /// Log in as a freshly generated user and return their email.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails.
    pub async fn login_fresh_user(&self) -> String {
        let email = format!("it-{}@example.com", Uuid::new_v4());
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .expect("Failed to log in");
        assert!(resp.status().is_success(), "login failed: {}", resp.status());
        email
    }

    /// Seed one product and return its generated ID.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails.
    pub async fn seed_product(&self, name: &str, description: &str, cents: i64) -> String {
        let id = format!("p-{}", Uuid::new_v4());
        sqlx::query(
            r"
            INSERT INTO product (id, name, description, price, image_url)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(&id)
        .bind(name)
        .bind(description)
        .bind(Decimal::new(cents, 2))
        .bind(format!("https://img.example/{id}.jpg"))
        .execute(&self.pool)
        .await
        .expect("Failed to seed product");
        id
    }
}
