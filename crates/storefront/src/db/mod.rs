//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `orchard_storefront`
//!
//! ## Tables
//!
//! - `product` - Read-only catalog reference data (seeded externally)
//! - `cart` - One row per user, keyed by the unique `user_id`
//! - `cart_line` - One row per (cart, product) pair, quantity always positive
//! - `sessions` - Tower-sessions storage
//!
//! The cart tables are the only shared mutable state in the system. Every
//! write goes through a single atomic statement (conditional upsert, atomic
//! increment, keyed delete) so that concurrent requests - possibly on
//! different server instances - never lose updates. There are no in-process
//! locks and no read-modify-write cycles.
//!
//! # Migrations
//!
//! Migrations live in `crates/storefront/migrations/` and are embedded via
//! `sqlx::migrate!`; the binary runs them at startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod products;

pub use carts::CartRepository;
pub use products::ProductCatalog;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (includes transient storage failures).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// A referenced row does not exist (e.g., unknown product ID).
    #[error("unknown reference: {0}")]
    UnknownReference(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// The pool is the process's single persistence handle; it is constructed
/// here and injected into the repositories, never accessed as a global.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
