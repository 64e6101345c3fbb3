//! Shipment weight using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("weight is required")]
    Empty,
    #[error("weight must be a number, got {0:?}")]
    NotANumber(String),
    #[error("weight cannot be negative")]
    Negative,
    #[error("weight must be below {} lbs", Weight::LIMIT)]
    TooLarge,
    #[error("weight allows at most {} decimal places", Weight::MAX_SCALE)]
    TooPrecise,
}

/// Non-negative shipment weight in pounds.
///
/// Bounded to what a `NUMERIC(12, 2)` column stores exactly: at most two
/// decimal places and strictly below ten billion.
///
/// ```
/// use streamline_core::Weight;
///
/// let w = Weight::parse("1500").unwrap();
/// assert!((w.as_f64() - 1500.0).abs() < f64::EPSILON);
/// assert!(Weight::parse("-1").is_err());
/// assert!(Weight::parse("heavy").is_err());
/// assert!(Weight::parse("1.239").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Weight(Decimal);

impl Weight {
    /// Exclusive upper bound, in pounds.
    pub const LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

    pub const MAX_SCALE: u32 = 2;

    /// Validate a decimal weight.
    ///
    /// Trailing zeros do not count towards the scale, so `12.500` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`WeightError::Negative`] for values below zero,
    /// [`WeightError::TooLarge`] at or above [`Self::LIMIT`] and
    /// [`WeightError::TooPrecise`] beyond [`Self::MAX_SCALE`] decimal places.
    pub fn new(pounds: Decimal) -> Result<Self, WeightError> {
        if pounds.is_sign_negative() && !pounds.is_zero() {
            return Err(WeightError::Negative);
        }
        let pounds = pounds.normalize();
        if pounds >= Self::LIMIT {
            return Err(WeightError::TooLarge);
        }
        if pounds.scale() > Self::MAX_SCALE {
            return Err(WeightError::TooPrecise);
        }
        Ok(Self(pounds))
    }

    /// Parse a weight from form input such as `"1500"` or `"12.5"`.
    ///
    /// # Errors
    ///
    /// Returns an error for empty, non-numeric, or negative input.
    pub fn parse(s: &str) -> Result<Self, WeightError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(WeightError::Empty);
        }
        let value: Decimal = trimmed
            .parse()
            .map_err(|_| WeightError::NotANumber(trimmed.to_owned()))?;
        Self::new(value)
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lbs", self.0)
    }
}

impl TryFrom<Decimal> for Weight {
    type Error = WeightError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Weight> for Decimal {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Weight::parse("1500").unwrap().as_decimal(), Decimal::from(1500));
        assert_eq!(
            Weight::parse(" 12.50 ").unwrap().as_decimal(),
            Decimal::new(125, 1)
        );
        assert_eq!(Weight::parse("0").unwrap().as_decimal(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Weight::parse(""), Err(WeightError::Empty));
        assert_eq!(Weight::parse("-0.5"), Err(WeightError::Negative));
        assert!(matches!(Weight::parse("1,500"), Err(WeightError::NotANumber(_))));
        assert!(matches!(Weight::parse("NaN"), Err(WeightError::NotANumber(_))));
    }

    #[test]
    fn test_limit_is_ten_billion() {
        assert_eq!(Weight::LIMIT, Decimal::from(10_000_000_000_i64));
    }

    #[test]
    fn test_rejects_values_the_column_cannot_hold() {
        assert_eq!(Weight::parse("123456789012345"), Err(WeightError::TooLarge));
        assert_eq!(Weight::parse("10000000000"), Err(WeightError::TooLarge));
        assert_eq!(Weight::parse("1.239"), Err(WeightError::TooPrecise));
        assert_eq!(Weight::parse("0.001"), Err(WeightError::TooPrecise));

        let max = Weight::parse("9999999999.99").unwrap();
        assert_eq!(max.as_decimal(), Decimal::new(999_999_999_999, 2));
        assert_eq!(
            Weight::parse("12.500").unwrap().as_decimal(),
            Decimal::new(125, 1)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Weight::parse("1500.0").unwrap().to_string(), "1500 lbs");
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Weight>("\"-3\"").is_err());
        assert!(serde_json::from_str::<Weight>("\"2.005\"").is_err());
        let w: Weight = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(w.as_decimal(), Decimal::from(42));
    }
}
