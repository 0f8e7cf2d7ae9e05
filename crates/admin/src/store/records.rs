//! Record collections served by the store.

use async_trait::async_trait;
use serde_json::Value;
use tracing::instrument;
use zia_mia_core::{
    Customer, CustomerId, DataAccess, DataAccessError, Flavour, FlavourId, ItemType, Order,
    OrderId, Payload, Record,
};

use super::{StoreClient, StoreError};

impl StoreClient {
    /// Fetch one record, treating 404 as absent.
    async fn find<T: serde::de::DeserializeOwned>(
        &self,
        item_type: ItemType,
        id: i32,
    ) -> Result<Option<T>, StoreError> {
        match self.get(&format!("{item_type}/{id}")).await {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Map a 404 on a write to the record that was targeted.
fn missing(item_type: ItemType, id: i32) -> impl FnOnce(StoreError) -> DataAccessError {
    move |err| match err {
        StoreError::NotFound(_) => DataAccessError::NotFound { item_type, id },
        other => other.into(),
    }
}

fn decode(item_type: ItemType, value: Value) -> Result<Record, DataAccessError> {
    Record::from_value(item_type, value).map_err(|e| DataAccessError::Decode(e.to_string()))
}

#[async_trait]
impl DataAccess for StoreClient {
    #[instrument(skip(self))]
    async fn customers(&self) -> Result<Vec<Customer>, DataAccessError> {
        Ok(self.get(ItemType::Customers.as_str()).await?)
    }

    #[instrument(skip(self))]
    async fn flavours(&self) -> Result<Vec<Flavour>, DataAccessError> {
        Ok(self.get(ItemType::Flavours.as_str()).await?)
    }

    #[instrument(skip(self))]
    async fn orders(&self) -> Result<Vec<Order>, DataAccessError> {
        Ok(self.get(ItemType::Orders.as_str()).await?)
    }

    #[instrument(skip(self), fields(customer_id = %id))]
    async fn customer(&self, id: CustomerId) -> Result<Option<Customer>, DataAccessError> {
        Ok(self.find(ItemType::Customers, id.as_i32()).await?)
    }

    #[instrument(skip(self), fields(flavour_id = %id))]
    async fn flavour(&self, id: FlavourId) -> Result<Option<Flavour>, DataAccessError> {
        Ok(self.find(ItemType::Flavours, id.as_i32()).await?)
    }

    #[instrument(skip(self), fields(order_id = %id))]
    async fn order(&self, id: OrderId) -> Result<Option<Order>, DataAccessError> {
        Ok(self.find(ItemType::Orders, id.as_i32()).await?)
    }

    #[instrument(skip(self, payload), fields(item_type = %payload.item_type()))]
    async fn create(&self, payload: &Payload) -> Result<Record, DataAccessError> {
        let item_type = payload.item_type();
        let value: Value = self.post(item_type.as_str(), payload).await?;
        decode(item_type, value)
    }

    #[instrument(skip(self, payload), fields(item_type = %payload.item_type()))]
    async fn update(&self, id: i32, payload: &Payload) -> Result<Record, DataAccessError> {
        let item_type = payload.item_type();
        let value: Value = self
            .put(&format!("{item_type}/{id}"), payload)
            .await
            .map_err(missing(item_type, id))?;
        decode(item_type, value)
    }

    #[instrument(skip(self))]
    async fn delete(&self, item_type: ItemType, id: i32) -> Result<(), DataAccessError> {
        self.remove(&format!("{item_type}/{id}"))
            .await
            .map_err(missing(item_type, id))
    }
}
