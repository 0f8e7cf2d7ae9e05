//! Admissibility rules for writes.
//!
//! The [`Validator`] decides whether a proposed add, update or delete may reach
//! the store. It reads current records through an injected [`DataAccess`] and
//! never writes. Every applicable rule is evaluated, so a rejected
//! [`Verdict`] lists all violations at once.
//!
//! # Gates
//!
//! - [`Validator::validate_add_update`] - dispatches a [`Draft`] to the rule set
//!   of its item type
//! - [`Validator::validate_delete`] - referential-integrity checks before a
//!   delete

mod customer;
mod delete;
mod flavour;
mod order;
pub mod predicates;
pub mod rules;

use core::fmt;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::data_access::{DataAccess, DataAccessError};
use crate::types::{Draft, ItemType, Operation};

/// One human-readable reason a write is inadmissible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation(String);

impl Violation {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outcome of one validation run: ordered violations, empty when the
/// write is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    violations: Vec<Violation>,
}

impl Verdict {
    #[must_use]
    pub const fn accepted() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    #[must_use]
    pub fn rejected(violation: Violation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Verdict for a raw item-type tag that names no known record kind.
    ///
    /// Used by every gate, add/update and delete alike.
    #[must_use]
    pub fn incorrect_item_type() -> Self {
        Self::rejected(rules::incorrect_item_type())
    }

    /// Verdict for a write that targets a record the store does not have.
    #[must_use]
    pub fn not_found(item_type: ItemType, id: i32) -> Self {
        Self::rejected(rules::not_found(item_type, id))
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Messages in the order the rules produced them.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(Violation::as_str)
    }

    /// Split into `(has_errors, messages)`.
    #[must_use]
    pub fn into_parts(self) -> (bool, Vec<String>) {
        let has_errors = self.has_errors();
        (
            has_errors,
            self.violations.into_iter().map(Violation::into_inner).collect(),
        )
    }
}

impl From<Vec<Violation>> for Verdict {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

/// Gatekeeper for every write to the store.
///
/// Cheap to clone; the data access handle is shared.
#[derive(Clone)]
pub struct Validator {
    data: Arc<dyn DataAccess>,
}

impl Validator {
    pub fn new(data: Arc<dyn DataAccess>) -> Self {
        Self { data }
    }

    /// Validate an add or update of any record type.
    ///
    /// # Errors
    ///
    /// Returns an error only if current records cannot be read.
    #[instrument(skip(self, draft), fields(item_type = %draft.item_type()))]
    pub async fn validate_add_update(
        &self,
        operation: Operation,
        draft: &Draft,
    ) -> Result<Verdict, DataAccessError> {
        let violations = match draft {
            Draft::Customer(d) => Self::validate_customer(operation, d),
            Draft::Flavour(d) => self.validate_flavour(operation, d).await?,
            Draft::Order(d) => self.validate_order(operation, d).await?,
        };

        let verdict = Verdict::from(violations);
        debug!(
            %operation,
            violations = verdict.violations().len(),
            "validated write"
        );
        Ok(verdict)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::snapshot::Snapshot;
    use crate::types::{
        Customer, CustomerId, Flavour, FlavourId, KiloPrice, Order, OrderId, OrderStatus,
    };

    use super::Validator;

    pub fn customer(id: i32, name: &str) -> Customer {
        Customer {
            id: CustomerId::new(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    pub fn flavour(id: i32, name: &str, price: &str) -> Flavour {
        Flavour {
            id: FlavourId::new(id),
            name: name.to_string(),
            price: KiloPrice::parse(price).unwrap_or_default(),
        }
    }

    pub fn order(id: i32, customer_id: i32, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            customer_id: CustomerId::new(customer_id),
            date: "2024-06-01".to_string(),
            status,
            order_description: "Two kilos of gelato".to_string(),
        }
    }

    /// Alice has two open orders, Bob has none, Carol has one delivered order.
    pub fn shop() -> Arc<Snapshot> {
        Arc::new(Snapshot::new(
            vec![customer(1, "Alice"), customer(2, "Bob"), customer(3, "Carol")],
            vec![
                flavour(1, "Vanilla", "3"),
                flavour(2, "Pistachio", "4.5"),
            ],
            vec![
                order(1, 1, OrderStatus::Paid),
                order(2, 1, OrderStatus::Unpaid),
                order(3, 3, OrderStatus::Delivered),
            ],
        ))
    }

    pub fn validator() -> Validator {
        Validator::new(shop())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::fixtures::validator;
    use super::*;
    use crate::types::{CustomerDraft, FlavourDraft, ItemType};

    fn flavour(name: &str, price: &str) -> Draft {
        Draft::Flavour(FlavourDraft {
            id: None,
            name: name.to_string(),
            price: price.to_string(),
        })
    }

    #[tokio::test]
    async fn test_two_letter_flavour_is_accepted() {
        let verdict = validator()
            .validate_add_update(Operation::Add, &flavour("Va", "3"))
            .await
            .unwrap();
        assert_eq!(verdict.into_parts(), (false, vec![]));
    }

    #[tokio::test]
    async fn test_one_letter_flavour_reports_only_length() {
        let verdict = validator()
            .validate_add_update(Operation::Add, &flavour("V", "3"))
            .await
            .unwrap();
        assert_eq!(
            verdict.into_parts(),
            (
                true,
                vec![
                    "The name of an icecream flavour needs to be at least 2 characters long"
                        .to_string()
                ]
            )
        );
    }

    #[tokio::test]
    async fn test_customer_drafts_are_always_accepted() {
        let draft = Draft::Customer(CustomerDraft::default());
        let verdict = validator()
            .validate_add_update(Operation::Update, &draft)
            .await
            .unwrap();
        assert!(!verdict.has_errors());
    }

    #[tokio::test]
    async fn test_validation_is_repeatable() {
        let validator = validator();
        let draft = flavour("Vanilla", "free");

        let first = validator
            .validate_add_update(Operation::Add, &draft)
            .await
            .unwrap();
        let second = validator
            .validate_add_update(Operation::Add, &draft)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first.violations().len(), 2);

        let again = validator.validate_delete(ItemType::Customers, 1).await.unwrap();
        assert_eq!(again, validator.validate_delete(ItemType::Customers, 1).await.unwrap());
    }

    #[test]
    fn test_incorrect_item_type_verdict() {
        assert_eq!(
            Verdict::incorrect_item_type().into_parts(),
            (true, vec!["Incorrect item type".to_string()])
        );
    }

    #[test]
    fn test_messages_keep_rule_order() {
        let verdict = Verdict::from(vec![Violation::new("first"), Violation::new("second")]);
        assert_eq!(verdict.messages().collect::<Vec<_>>(), ["first", "second"]);
    }
}
