//! Business services for storefront.

pub mod cart;

pub use cart::{CartError, CartService};
