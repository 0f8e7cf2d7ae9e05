//! The data access capability.
//!
//! Business rules never talk to a store directly. They receive a
//! [`DataAccess`] implementation at construction: the HTTP client in
//! `zia-mia-admin` for real use, or a [`Snapshot`](crate::Snapshot) in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    Customer, CustomerId, Flavour, FlavourId, ItemType, Order, OrderId, Payload, Record,
};

/// Errors raised by a data access implementation.
///
/// These are infrastructure failures. Business rule violations are never
/// reported through this type.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// The store could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered with an unexpected status.
    #[error("store responded with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The store rejected the API key.
    #[error("store rejected the API key")]
    Unauthorized,

    /// A write targeted a record that does not exist.
    #[error("{item_type} record {id} not found")]
    NotFound { item_type: ItemType, id: i32 },

    /// Every id of a collection up to `i32::MAX` is taken.
    #[error("no ids left in {0}")]
    IdsExhausted(ItemType),

    /// The store answered with data that does not match the record types.
    #[error("failed to decode store response: {0}")]
    Decode(String),
}

/// Read and write access to the shop's records.
///
/// Single-record lookups default to scanning the full listing, so an
/// implementation only has to provide the listings and the writes.
#[async_trait]
pub trait DataAccess: Send + Sync {
    async fn customers(&self) -> Result<Vec<Customer>, DataAccessError>;

    async fn flavours(&self) -> Result<Vec<Flavour>, DataAccessError>;

    async fn orders(&self) -> Result<Vec<Order>, DataAccessError>;

    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError> {
        Ok(self.customers().await?.into_iter().find(|c| c.id == id))
    }

    async fn flavour(&self, id: FlavourId) -> Result<Option<Flavour>, DataAccessError> {
        Ok(self.flavours().await?.into_iter().find(|f| f.id == id))
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>, DataAccessError> {
        Ok(self.orders().await?.into_iter().find(|o| o.id == id))
    }

    /// All records of one type.
    async fn records(&self, item_type: ItemType) -> Result<Vec<Record>, DataAccessError> {
        Ok(match item_type {
            ItemType::Customers => self.customers().await?.into_iter().map(Record::Customer).collect(),
            ItemType::Flavours => self.flavours().await?.into_iter().map(Record::Flavour).collect(),
            ItemType::Orders => self.orders().await?.into_iter().map(Record::Order).collect(),
        })
    }

    /// One record by type and id, `None` when absent.
    async fn record(&self, item_type: ItemType, id: i32) -> Result<Option<Record>, DataAccessError> {
        Ok(match item_type {
            ItemType::Customers => self.customer(CustomerId::new(id)).await?.map(Record::Customer),
            ItemType::Flavours => self.flavour(FlavourId::new(id)).await?.map(Record::Flavour),
            ItemType::Orders => self.order(OrderId::new(id)).await?.map(Record::Order),
        })
    }

    /// Create a record; the store assigns the id.
    async fn create(&self, payload: &Payload) -> Result<Record, DataAccessError>;

    /// Replace the fields of an existing record.
    async fn update(&self, id: i32, payload: &Payload) -> Result<Record, DataAccessError>;

    async fn delete(&self, item_type: ItemType, id: i32) -> Result<(), DataAccessError>;
}
