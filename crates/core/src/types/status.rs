//! Status enums and the shipment transition rule.

use serde::{Deserialize, Serialize};

/// A status/role string that is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Lifecycle status of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shipment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Delayed,
}

impl ShipmentStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InTransit,
        Self::Delivered,
        Self::Delayed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InTransit => "in_transit",
            Self::Delivered => "delivered",
            Self::Delayed => "delayed",
        }
    }

    /// Human label, e.g. "In Transit".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Delayed => "Delayed",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_transit" => Ok(Self::InTransit),
            "delivered" => Ok(Self::Delivered),
            "delayed" => Ok(Self::Delayed),
            _ => Err(ParseStatusError::new("shipment status", s)),
        }
    }
}

/// Which status changes the registry accepts.
///
/// All call sites go through [`TransitionPolicy::allows`], so tightening the
/// workflow is a configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Unconstrained,
    /// `pending → in_transit → {delivered, delayed}`, `delayed → in_transit`;
    /// `delivered` is terminal.
    Strict,
}

impl TransitionPolicy {
    /// Whether a shipment in `from` may be moved to `to`.
    ///
    /// Re-applying the current status is always accepted.
    #[must_use]
    pub const fn allows(self, from: ShipmentStatus, to: ShipmentStatus) -> bool {
        use ShipmentStatus::{Delayed, Delivered, InTransit, Pending};

        if from as u8 == to as u8 {
            return true;
        }

        match self {
            Self::Unconstrained => true,
            Self::Strict => matches!(
                (from, to),
                (Pending, InTransit)
                    | (InTransit, Delivered | Delayed)
                    | (Delayed, InTransit)
            ),
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unconstrained" => Ok(Self::Unconstrained),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseStatusError::new("transition policy", s)),
        }
    }
}

/// Read state of an inbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "message_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => f.write_str("new"),
            Self::Read => f.write_str("read"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in ShipmentStatus::ALL {
            assert_eq!(status.as_str().parse::<ShipmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        for bad in ["", "shipped", "In Transit", "PENDING", "in-transit"] {
            let err = bad.parse::<ShipmentStatus>().unwrap_err();
            assert_eq!(err.value(), bad);
        }
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ShipmentStatus::InTransit).unwrap();
        assert_eq!(json, "\"in_transit\"");
        assert!(serde_json::from_str::<ShipmentStatus>("\"lost\"").is_err());
    }

    #[test]
    fn test_unconstrained_allows_everything() {
        for from in ShipmentStatus::ALL {
            for to in ShipmentStatus::ALL {
                assert!(TransitionPolicy::Unconstrained.allows(from, to));
            }
        }
    }

    #[test]
    fn test_strict_edges() {
        use ShipmentStatus::{Delayed, Delivered, InTransit, Pending};
        let strict = TransitionPolicy::Strict;

        assert!(strict.allows(Pending, InTransit));
        assert!(strict.allows(InTransit, Delivered));
        assert!(strict.allows(InTransit, Delayed));
        assert!(strict.allows(Delayed, InTransit));

        assert!(!strict.allows(Pending, Delivered));
        assert!(!strict.allows(Delivered, Pending));
        assert!(!strict.allows(Delivered, InTransit));
        assert!(!strict.allows(Delayed, Delivered));
    }

    #[test]
    fn test_same_status_is_always_allowed() {
        for status in ShipmentStatus::ALL {
            assert!(TransitionPolicy::Strict.allows(status, status));
        }
    }
}
