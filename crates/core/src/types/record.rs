//! Stored records and the payloads written to the store.
//!
//! Field names follow the store's JSON (`customerId`, `orderDescription`).

use serde::{Deserialize, Serialize};

use super::{CustomerId, FlavourId, ItemType, KiloPrice, OrderId, OrderStatus};

/// A shop customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
}

/// An ice-cream flavour with its kilogram price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flavour {
    pub id: FlavourId,
    pub name: String,
    pub price: KiloPrice,
}

/// An order placed by a customer.
///
/// `customer_id` is a non-owning reference; the customer must exist when the
/// order is written and cannot be deleted while the order remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub date: String,
    pub status: OrderStatus,
    pub order_description: String,
}

/// Any stored record, tagged by its item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Customer(Customer),
    Flavour(Flavour),
    Order(Order),
}

impl Record {
    /// The store-assigned id.
    #[must_use]
    pub const fn id(&self) -> i32 {
        match self {
            Self::Customer(c) => c.id.as_i32(),
            Self::Flavour(f) => f.id.as_i32(),
            Self::Order(o) => o.id.as_i32(),
        }
    }

    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Customer(_) => ItemType::Customers,
            Self::Flavour(_) => ItemType::Flavours,
            Self::Order(_) => ItemType::Orders,
        }
    }

    /// Field values keyed by their form/wire names, in form order.
    ///
    /// The id is not included.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Customer(c) => vec![("name", c.name.clone()), ("email", c.email.clone())],
            Self::Flavour(f) => vec![("name", f.name.clone()), ("price", f.price.to_string())],
            Self::Order(o) => vec![
                ("customerId", o.customer_id.to_string()),
                ("date", o.date.clone()),
                ("status", o.status.to_string()),
                ("orderDescription", o.order_description.clone()),
            ],
        }
    }

    /// Decode a record of the given type from store JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the value does not match the type.
    pub fn from_value(item_type: ItemType, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match item_type {
            ItemType::Customers => Self::Customer(serde_json::from_value(value)?),
            ItemType::Flavours => Self::Flavour(serde_json::from_value(value)?),
            ItemType::Orders => Self::Order(serde_json::from_value(value)?),
        })
    }
}

/// Body of a customer write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
}

/// Body of a flavour write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavourPayload {
    pub name: String,
    pub price: KiloPrice,
}

/// Body of an order write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub customer_id: CustomerId,
    pub date: String,
    pub status: OrderStatus,
    pub order_description: String,
}

/// A typed create/update body, tagged by item type.
///
/// Built from a [`Draft`](super::Draft) that passed validation; serializes to
/// the bare field object the store expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Customer(CustomerPayload),
    Flavour(FlavourPayload),
    Order(OrderPayload),
}

impl Payload {
    #[must_use]
    pub const fn item_type(&self) -> ItemType {
        match self {
            Self::Customer(_) => ItemType::Customers,
            Self::Flavour(_) => ItemType::Flavours,
            Self::Order(_) => ItemType::Orders,
        }
    }

    /// Combine the payload with a store-assigned id into a full record.
    #[must_use]
    pub fn into_record(self, id: i32) -> Record {
        match self {
            Self::Customer(p) => Record::Customer(Customer {
                id: CustomerId::new(id),
                name: p.name,
                email: p.email,
            }),
            Self::Flavour(p) => Record::Flavour(Flavour {
                id: FlavourId::new(id),
                name: p.name,
                price: p.price,
            }),
            Self::Order(p) => Record::Order(Order {
                id: OrderId::new(id),
                customer_id: p.customer_id,
                date: p.date,
                status: p.status,
                order_description: p.order_description,
            }),
        }
    }
}
