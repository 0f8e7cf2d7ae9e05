//! Item types and write operations.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a raw item-type tag names no known record kind.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown item type: {0}")]
pub struct UnknownItemType(pub String);

/// The record kinds managed by the shop.
///
/// The string form doubles as the store's collection name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Customers,
    Flavours,
    Orders,
}

impl ItemType {
    /// All item types in menu order.
    pub const ALL: [Self; 3] = [Self::Customers, Self::Flavours, Self::Orders];

    /// Collection name used in store URLs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Flavours => "flavours",
            Self::Orders => "orders",
        }
    }

    /// Singular label for a single record ("customer", "flavour", "order").
    #[must_use]
    pub const fn singular(&self) -> &'static str {
        match self {
            Self::Customers => "customer",
            Self::Flavours => "flavour",
            Self::Orders => "order",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customers" => Ok(Self::Customers),
            "flavours" => Ok(Self::Flavours),
            "orders" => Ok(Self::Orders),
            _ => Err(UnknownItemType(s.to_owned())),
        }
    }
}

/// The kind of write a draft is submitted for.
///
/// Deletes have no payload and go through
/// [`Validator::validate_delete`](crate::Validator::validate_delete) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Update => f.write_str("update"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_round_trips_through_str() {
        for item_type in ItemType::ALL {
            assert_eq!(item_type.as_str().parse::<ItemType>().unwrap(), item_type);
        }
    }

    #[test]
    fn test_item_type_rejects_unknown_tag() {
        let err = "toppings".parse::<ItemType>().unwrap_err();
        assert_eq!(err, UnknownItemType("toppings".to_string()));
    }

    #[test]
    fn test_item_type_is_case_sensitive() {
        assert!("Customers".parse::<ItemType>().is_err());
    }
}
