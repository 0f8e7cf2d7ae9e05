use tracing::{debug, instrument};

use super::rules;
use super::{Validator, Verdict, Violation};
use crate::data_access::DataAccessError;
use crate::types::{CustomerId, FlavourId, ItemType, OrderId};

impl Validator {
    /// Referential-integrity checks before deleting a record.
    ///
    /// - customers: must exist and have no orders
    /// - orders: must exist and be delivered
    /// - flavours: must exist
    ///
    /// # Errors
    ///
    /// Returns an error only if current records cannot be read.
    #[instrument(skip(self))]
    pub async fn validate_delete(
        &self,
        item_type: ItemType,
        id: i32,
    ) -> Result<Verdict, DataAccessError> {
        let violations = match item_type {
            ItemType::Customers => self.validate_delete_customer(CustomerId::new(id)).await?,
            ItemType::Flavours => self.validate_delete_flavour(FlavourId::new(id)).await?,
            ItemType::Orders => self.validate_delete_order(OrderId::new(id)).await?,
        };

        let verdict = Verdict::from(violations);
        debug!(violations = verdict.violations().len(), "validated delete");
        Ok(verdict)
    }

    /// [`Validator::validate_delete`] for a raw item-type tag.
    ///
    /// An unknown tag is rejected with `Incorrect item type`, the same as on
    /// add and update.
    ///
    /// # Errors
    ///
    /// Returns an error only if current records cannot be read.
    pub async fn validate_delete_tagged(
        &self,
        item_type: &str,
        id: i32,
    ) -> Result<Verdict, DataAccessError> {
        match item_type.parse::<ItemType>() {
            Ok(item_type) => self.validate_delete(item_type, id).await,
            Err(_) => Ok(Verdict::incorrect_item_type()),
        }
    }

    async fn validate_delete_customer(
        &self,
        id: CustomerId,
    ) -> Result<Vec<Violation>, DataAccessError> {
        let Some(customer) = self.data.customer(id).await? else {
            return Ok(vec![rules::not_found(ItemType::Customers, id.as_i32())]);
        };

        let order_count = self
            .data
            .orders()
            .await?
            .iter()
            .filter(|o| o.customer_id == id)
            .count();

        if order_count > 0 {
            return Ok(vec![rules::customer_has_orders(&customer.name, order_count)]);
        }
        Ok(Vec::new())
    }

    async fn validate_delete_order(&self, id: OrderId) -> Result<Vec<Violation>, DataAccessError> {
        Ok(match self.data.order(id).await? {
            None => vec![rules::not_found(ItemType::Orders, id.as_i32())],
            Some(order) if !order.status.is_deletable() => vec![rules::order_not_delivered()],
            Some(_) => Vec::new(),
        })
    }

    async fn validate_delete_flavour(
        &self,
        id: FlavourId,
    ) -> Result<Vec<Violation>, DataAccessError> {
        Ok(match self.data.flavour(id).await? {
            None => vec![rules::not_found(ItemType::Flavours, id.as_i32())],
            Some(_) => Vec::new(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::fixtures::validator;
    use super::*;

    async fn parts(item_type: ItemType, id: i32) -> (bool, Vec<String>) {
        validator()
            .validate_delete(item_type, id)
            .await
            .unwrap()
            .into_parts()
    }

    #[tokio::test]
    async fn test_customer_with_orders_cannot_be_deleted() {
        assert_eq!(
            parts(ItemType::Customers, 1).await,
            (
                true,
                vec!["Customer \"Alice\" cannot be deleted, they still have 2 orders.".to_string()]
            )
        );
    }

    #[tokio::test]
    async fn test_delivered_orders_still_block_customer_delete() {
        let (has_errors, messages) = parts(ItemType::Customers, 3).await;
        assert!(has_errors);
        assert_eq!(
            messages,
            ["Customer \"Carol\" cannot be deleted, they still have 1 orders."]
        );
    }

    #[tokio::test]
    async fn test_customer_without_orders_can_be_deleted() {
        assert_eq!(parts(ItemType::Customers, 2).await, (false, vec![]));
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found() {
        assert_eq!(
            parts(ItemType::Customers, 42).await,
            (true, vec!["Customer 42 does not exist.".to_string()])
        );
    }

    #[tokio::test]
    async fn test_undelivered_order_cannot_be_deleted() {
        assert_eq!(
            parts(ItemType::Orders, 1).await,
            (
                true,
                vec!["That order cannot be deleted. Only delivered orders can be deleted.".to_string()]
            )
        );
    }

    #[tokio::test]
    async fn test_delivered_order_can_be_deleted() {
        assert_eq!(parts(ItemType::Orders, 3).await, (false, vec![]));
    }

    #[tokio::test]
    async fn test_missing_order_is_not_found() {
        assert_eq!(
            parts(ItemType::Orders, 8).await,
            (true, vec!["Order 8 does not exist.".to_string()])
        );
    }

    #[tokio::test]
    async fn test_unknown_tag_is_rejected_not_accepted() {
        let verdict = validator()
            .validate_delete_tagged("toppings", 1)
            .await
            .unwrap();
        assert_eq!(
            verdict.into_parts(),
            (true, vec!["Incorrect item type".to_string()])
        );

        let verdict = validator().validate_delete_tagged("orders", 3).await.unwrap();
        assert!(!verdict.has_errors());
    }

    #[tokio::test]
    async fn test_flavours_only_need_to_exist() {
        assert_eq!(parts(ItemType::Flavours, 2).await, (false, vec![]));
        assert_eq!(
            parts(ItemType::Flavours, 5).await,
            (true, vec!["Flavour 5 does not exist.".to_string()])
        );
    }
}
