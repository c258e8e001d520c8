//! Type-safe unit price using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] to avoid binary floating point drift, but
//! the stored cart record carries them as plain JSON numbers. Serialization
//! goes through `rust_decimal::serde::arbitrary_precision`, which writes the
//! decimal digits verbatim instead of passing through an `f64`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("price must be a decimal number (got {0:?})")]
    Invalid(String),
}

/// A non-negative unit price.
///
/// The currency is implied by the catalog that supplied the product; the cart
/// never converts or totals prices.
///
/// ## Examples
///
/// ```
/// use marketplace_core::Price;
/// use rust_decimal::Decimal;
///
/// assert!(Price::new(Decimal::new(1999, 2)).is_ok());
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the decimal amount.
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

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = s
            .trim()
            .parse::<Decimal>()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::arbitrary_precision::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::arbitrary_precision::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_rejects_negative() {
        let err = Price::new(Decimal::new(-50, 2)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-50, 2)));
    }

    #[test]
    fn test_price_accepts_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "19.99".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(1999, 2));

        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
        assert!(matches!("-1".parse::<Price>(), Err(PriceError::Negative(_))));
    }

    #[test]
    fn test_price_display_two_places() {
        let price = Price::new(Decimal::new(50, 0)).unwrap();
        assert_eq!(price.to_string(), "50.00");
    }

    #[test]
    fn test_price_serializes_as_number() {
        let price = Price::new(Decimal::new(1225, 2)).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "12.25");
    }

    #[test]
    fn test_price_deserializes_integers_and_floats() {
        let whole: Price = serde_json::from_str("50").unwrap();
        assert_eq!(whole.amount(), Decimal::new(50, 0));

        let fractional: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(fractional.amount(), Decimal::new(125, 1));
    }

    #[test]
    fn test_price_serializes_digits_beyond_f64() {
        let price: Price = "12345678901234567.89".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "12345678901234567.89");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_price_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
