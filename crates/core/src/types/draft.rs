//! Drafts: submitted record data awaiting validation.
//!
//! Drafts carry form values after trimming and id parsing but before any
//! business rule has looked at them, so fields the rules check (price, status)
//! are still text.

use super::{
    CustomerId, CustomerPayload, FlavourId, FlavourPayload, ItemType, KiloPrice, OrderId,
    OrderPayload, OrderStatus, Payload,
};

/// Errors converting a draft into a store payload.
///
/// Only reachable for drafts that were not validated first.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("price is not a number: {0}")]
    InvalidPrice(String),
    #[error("invalid order status: {0}")]
    InvalidStatus(String),
    #[error("order has no customer")]
    MissingCustomer,
}

/// Customer form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub id: Option<CustomerId>,
    pub name: String,
    pub email: String,
}

/// Flavour form data. `price` is the raw text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlavourDraft {
    pub id: Option<FlavourId>,
    pub name: String,
    pub price: String,
}

/// Order form data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDraft {
    pub id: Option<OrderId>,
    pub customer_id: Option<CustomerId>,
    pub date: String,
    pub status: String,
    pub order_description: String,
}

/// Submitted data for any record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Customer(CustomerDraft),
    Flavour(FlavourDraft),
    Order(OrderDraft),
}

impl Draft {
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Customer(_) => ItemType::Customers,
            Self::Flavour(_) => ItemType::Flavours,
            Self::Order(_) => ItemType::Orders,
        }
    }

    /// The id of the record being updated, if any.
    #[must_use]
    pub fn id(&self) -> Option<i32> {
        match self {
            Self::Customer(d) => d.id.map(i32::from),
            Self::Flavour(d) => d.id.map(i32::from),
            Self::Order(d) => d.id.map(i32::from),
        }
    }

    /// Convert the draft into the body written to the store.
    ///
    /// # Errors
    ///
    /// Returns a [`DraftError`] if a field the rules would have rejected cannot
    /// be converted.
    pub fn to_payload(&self) -> Result<Payload, DraftError> {
        Ok(match self {
            Self::Customer(d) => Payload::Customer(CustomerPayload {
                name: d.name.clone(),
                email: d.email.clone(),
            }),
            Self::Flavour(d) => Payload::Flavour(FlavourPayload {
                name: d.name.clone(),
                price: KiloPrice::parse(&d.price)
                    .ok_or_else(|| DraftError::InvalidPrice(d.price.clone()))?,
            }),
            Self::Order(d) => Payload::Order(OrderPayload {
                customer_id: d.customer_id.ok_or(DraftError::MissingCustomer)?,
                date: d.date.clone(),
                status: d
                    .status
                    .parse::<OrderStatus>()
                    .map_err(|_| DraftError::InvalidStatus(d.status.clone()))?,
                order_description: d.order_description.clone(),
            }),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_flavour_draft_to_payload() {
        let draft = Draft::Flavour(FlavourDraft {
            id: None,
            name: "Stracciatella".to_string(),
            price: "4.25".to_string(),
        });
        let Payload::Flavour(payload) = draft.to_payload().unwrap() else {
            panic!("expected flavour payload");
        };
        assert_eq!(payload.price.to_string(), "4.25");
    }

    #[test]
    fn test_order_draft_without_customer_fails() {
        let draft = Draft::Order(OrderDraft {
            status: "paid".to_string(),
            ..OrderDraft::default()
        });
        assert_eq!(draft.to_payload(), Err(DraftError::MissingCustomer));
    }

    #[test]
    fn test_order_draft_with_unknown_status_fails() {
        let draft = Draft::Order(OrderDraft {
            customer_id: Some(CustomerId::new(1)),
            status: "shipped".to_string(),
            ..OrderDraft::default()
        });
        assert_eq!(
            draft.to_payload(),
            Err(DraftError::InvalidStatus("shipped".to_string()))
        );
    }
}
