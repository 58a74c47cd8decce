//! Orchard Core - Shared types library.
//!
//! This crate provides common types used across all Orchard components:
//! - `storefront` - Public-facing catalog and cart API
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
