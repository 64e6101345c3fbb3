//! Customer-facing shipment tracking codes.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TrackingCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackingCodeError {
    #[error("tracking code must start with {prefix:?}")]
    MissingPrefix { prefix: &'static str },
    #[error("tracking code must have exactly {digits} digits after the prefix")]
    WrongLength { digits: usize },
    #[error("tracking code suffix must be numeric")]
    NonNumeric,
}

/// A shipment tracking code: `SL` followed by six digits, e.g. `SL042917`.
///
/// Distinct from the internal row ID. Codes are unique and never change once
/// a shipment exists. Lowercase `sl` prefixes are accepted on parse so that
/// customers can type codes as they read them.
///
/// ```
/// use streamline_core::TrackingCode;
///
/// let code = TrackingCode::parse("sl123456").unwrap();
/// assert_eq!(code.as_str(), "SL123456");
/// assert!(TrackingCode::parse("SL12345").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingCode(String);

impl TrackingCode {
    pub const PREFIX: &'static str = "SL";
    pub const DIGITS: usize = 6;

    /// Number of distinct codes the format can express.
    pub const SPACE: u32 = 1_000_000;

    /// Parse a tracking code typed by a user or read from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing, the suffix is not exactly
    /// [`Self::DIGITS`] characters, or the suffix contains non-digits.
    pub fn parse(s: &str) -> Result<Self, TrackingCodeError> {
        let trimmed = s.trim();
        let suffix = trimmed
            .get(..Self::PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(Self::PREFIX))
            .and_then(|_| trimmed.get(Self::PREFIX.len()..))
            .ok_or(TrackingCodeError::MissingPrefix {
                prefix: Self::PREFIX,
            })?;

        if suffix.len() != Self::DIGITS {
            return Err(TrackingCodeError::WrongLength {
                digits: Self::DIGITS,
            });
        }
        if !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TrackingCodeError::NonNumeric);
        }

        Ok(Self(format!("{}{suffix}", Self::PREFIX)))
    }

    /// Draw a random code from `rng`.
    ///
    /// Uniqueness is not implied; callers check the candidate against
    /// existing codes before committing it.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let n = rng.random_range(0..Self::SPACE);
        Self(format!("{}{n:06}", Self::PREFIX))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for TrackingCode {
    type Err = TrackingCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TrackingCode {
    type Error = TrackingCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TrackingCode> for String {
    fn from(code: TrackingCode) -> Self {
        code.0
    }
}

impl AsRef<str> for TrackingCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
