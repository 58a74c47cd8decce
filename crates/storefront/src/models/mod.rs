//! Domain models for storefront.

pub mod cart;
pub mod product;
pub mod session;

pub use cart::{Cart, CartLine, CartSnapshot};
pub use product::{Product, ProductPage};
pub use session::{CurrentUser, keys as session_keys};
