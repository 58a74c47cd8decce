//! Session-related types.
//!
//! Types stored in the session for authentication state. The authentication
//! gate establishes the session; the cart core only ever reads it.

use serde::{Deserialize, Serialize};

use orchard_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Stable identity key derived from the verified email.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

impl CurrentUser {
    /// Build the session identity from a verified email.
    #[must_use]
    pub fn from_email(email: Email) -> Self {
        Self {
            id: UserId::from(email.as_str()),
            email,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
