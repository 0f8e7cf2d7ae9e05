//! Kilogram price of a flavour, using decimal arithmetic.
//!
//! The record store keeps prices as plain JSON numbers, so the wire form is a
//! float while the in-memory form stays an exact [`Decimal`].

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::validation::predicates::parse_number;

/// Price of one kilogram of ice cream, in the shop's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KiloPrice(Decimal);

impl KiloPrice {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a price from form text.
    ///
    /// This is the single numeric policy shared by the form layer and the
    /// validator: the trimmed text must be a complete decimal number.
    /// Leading-digit prefixes such as `"3.5abc"` are rejected.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        parse_number(text).map(Self)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for KiloPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Serialize for KiloPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for KiloPrice {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_complete_numbers() {
        assert_eq!(KiloPrice::parse("3").unwrap().to_string(), "3");
        assert_eq!(KiloPrice::parse(" 1.75 ").unwrap().to_string(), "1.75");
    }

    #[test]
    fn test_parse_rejects_garbage_and_prefixes() {
        assert!(KiloPrice::parse("free").is_none());
        assert!(KiloPrice::parse("3.5abc").is_none());
        assert!(KiloPrice::parse("").is_none());
    }

    #[test]
    fn test_wire_form_is_json_number() {
        let price = KiloPrice::parse("2.5").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "2.5");

        let parsed: KiloPrice = serde_json::from_str("4").unwrap();
        assert_eq!(parsed.to_string(), "4");
    }
}
