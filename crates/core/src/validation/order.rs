use super::predicates::min_length;
use super::rules::{self, ORDER_DESCRIPTION_MIN_LENGTH};
use super::{Validator, Violation};
use crate::data_access::DataAccessError;
use crate::types::{Operation, OrderDraft, OrderStatus};

impl Validator {
    /// Rules for adding or updating an order.
    ///
    /// The customer must exist, the date must be filled in (its format is not
    /// checked), the status must be one of the fixed statuses and the
    /// description needs at least eight characters.
    ///
    /// # Errors
    ///
    /// Returns an error if the current customers cannot be read.
    pub async fn validate_order(
        &self,
        _operation: Operation,
        draft: &OrderDraft,
    ) -> Result<Vec<Violation>, DataAccessError> {
        let mut violations = Vec::new();

        let customer_exists = match draft.customer_id {
            Some(id) => self.data.customers().await?.iter().any(|c| c.id == id),
            None => false,
        };
        if !customer_exists {
            violations.push(rules::customer_not_selected());
        }

        if draft.date.is_empty() {
            violations.push(rules::date_required());
        }

        if draft.status.parse::<OrderStatus>().is_err() {
            violations.push(rules::status_invalid());
        }

        if !min_length(&draft.order_description, ORDER_DESCRIPTION_MIN_LENGTH) {
            violations.push(rules::description_too_short());
        }

        Ok(violations)
    }
}
