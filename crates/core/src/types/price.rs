//! Non-negative fixed-point price type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A product price in the store currency's standard unit (dollars, not cents).
///
/// Prices are fixed-point decimals and never negative. Currency is implicit;
/// multi-currency pricing is out of scope for the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::new(i64::try_from(cents).unwrap_or(i64::MAX), 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// SQLx support (with postgres feature): NUMERIC column
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are constrained non-negative by a CHECK
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        let result = Price::new(Decimal::new(-1, 2));
        assert_eq!(result, Err(PriceError::Negative));
    }

    #[test]
    fn test_accepts_zero() {
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1999);
        assert_eq!(price.to_string(), "19.99");
    }

    #[test]
    fn test_display_two_places() {
        let price = Price::new(Decimal::new(5, 0)).unwrap();
        assert_eq!(price.to_string(), "5.00");
    }

    #[test]
    fn test_serde_as_string() {
        // rust_decimal's serde-with-str feature serializes decimals as strings
        let price = Price::from_cents(1250);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"12.50\"");
    }
}
