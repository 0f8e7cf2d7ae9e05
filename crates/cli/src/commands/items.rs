//! Record commands: list, show, add, update, delete.
//!
//! # Usage
//!
//! ```bash
//! zm-cli list flavours
//! zm-cli show orders 3
//! zm-cli add flavours -f name=Pistachio -f price=4.5
//! zm-cli update orders 3 -f status=delivered
//! zm-cli delete customers 2
//! zm-cli statuses
//! ```
//!
//! A rejected write prints its violation messages as a bullet list, followed
//! by the current listing of the item type, and fails the command.

use std::io::Write;

use thiserror::Error;
use zia_mia_admin::{ItemService, Outcome, ServiceError};
use zia_mia_core::form::FormFields;
use zia_mia_core::{DataAccessError, ItemType, Record, Verdict, order_statuses};

use crate::render;

/// Errors that can occur while running a record command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Data(#[from] DataAccessError),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// The validator refused the request; messages were already printed.
    #[error("request rejected with {0} violation(s)")]
    Rejected(usize),
}

/// Parse a `key=value` command-line field.
///
/// # Errors
///
/// Returns a message if there is no `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

/// Print a listing of one item type.
///
/// # Errors
///
/// Returns an error if records cannot be read or output fails.
pub async fn list(service: &ItemService, item_type: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let Ok(parsed) = item_type.parse::<ItemType>() else {
        return reject(Verdict::incorrect_item_type(), None, service, out).await;
    };
    write_listing(service, parsed, out).await
}

/// Print one record.
///
/// # Errors
///
/// Returns an error if the record cannot be read, does not exist, or output
/// fails.
pub async fn show(
    service: &ItemService,
    item_type: &str,
    id: i32,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let Ok(parsed) = item_type.parse::<ItemType>() else {
        return reject(Verdict::incorrect_item_type(), None, service, out).await;
    };
    let Some(record) = service.data().record(parsed, id).await? else {
        return reject(Verdict::not_found(parsed, id), None, service, out).await;
    };
    let customers = customers_for(service, parsed).await?;
    write!(out, "{}", render::record(&record, &customers))?;
    Ok(())
}

/// Add a record from `key=value` fields.
///
/// # Errors
///
/// Returns [`CommandError::Rejected`] when validation fails, or an error if
/// the store fails.
pub async fn add(
    service: &ItemService,
    item_type: &str,
    fields: Vec<(String, String)>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let fields: FormFields = fields.into_iter().collect();
    let outcome = service.submit(item_type, &fields).await?;
    finish_write(service, item_type, outcome, out).await
}

/// Change fields of an existing record.
///
/// # Errors
///
/// Returns [`CommandError::Rejected`] when validation fails, or an error if
/// the store fails.
pub async fn update(
    service: &ItemService,
    item_type: &str,
    id: i32,
    changes: Vec<(String, String)>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let changes: FormFields = changes.into_iter().collect();
    let outcome = service.update(item_type, id, &changes).await?;
    finish_write(service, item_type, outcome, out).await
}

/// Delete a record.
///
/// # Errors
///
/// Returns [`CommandError::Rejected`] when referential integrity forbids the
/// delete, or an error if the store fails.
pub async fn delete(
    service: &ItemService,
    item_type: &str,
    id: i32,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let parsed = item_type.parse::<ItemType>().ok();
    match service.delete(item_type, id).await? {
        Outcome::Done(()) => {
            if let Some(parsed) = parsed {
                writeln!(out, "Deleted {} {id}.", parsed.singular())?;
                write_listing(service, parsed, out).await?;
            }
            Ok(())
        }
        Outcome::Rejected(verdict) => reject(verdict, parsed, service, out).await,
    }
}

/// Print the order statuses, one per line.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn statuses(out: &mut impl Write) -> Result<(), CommandError> {
    for status in order_statuses() {
        writeln!(out, "{status}")?;
    }
    Ok(())
}

async fn finish_write(
    service: &ItemService,
    item_type: &str,
    outcome: Outcome<Record>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let parsed = item_type.parse::<ItemType>().ok();
    match outcome {
        Outcome::Done(record) => {
            writeln!(
                out,
                "Saved {} {}.",
                record.item_type().singular(),
                record.id()
            )?;
            write_listing(service, record.item_type(), out).await
        }
        Outcome::Rejected(verdict) => reject(verdict, parsed, service, out).await,
    }
}

/// Print the violations, then the listing when the item type is known.
async fn reject(
    verdict: Verdict,
    item_type: Option<ItemType>,
    service: &ItemService,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    write!(out, "{}", render::errors(verdict.messages()))?;
    if let Some(item_type) = item_type {
        write_listing(service, item_type, out).await?;
    }
    Err(CommandError::Rejected(verdict.violations().len()))
}

async fn write_listing(
    service: &ItemService,
    item_type: ItemType,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    let records = service.data().records(item_type).await?;
    let customers = customers_for(service, item_type).await?;
    write!(out, "{}", render::list(item_type, &records, &customers))?;
    Ok(())
}

/// Customers are only needed to name the customer of an order.
async fn customers_for(
    service: &ItemService,
    item_type: ItemType,
) -> Result<Vec<zia_mia_core::Customer>, DataAccessError> {
    if item_type == ItemType::Orders {
        service.data().customers().await
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use zia_mia_core::{
        Customer, CustomerId, Flavour, FlavourId, KiloPrice, Order, OrderId, OrderStatus,
        Snapshot,
    };

    use super::*;

    fn service() -> (Arc<Snapshot>, ItemService) {
        let shop = Arc::new(Snapshot::new(
            vec![Customer {
                id: CustomerId::new(1),
                name: "Giulia".to_string(),
                email: "giulia@example.com".to_string(),
            }],
            vec![Flavour {
                id: FlavourId::new(1),
                name: "Vanilla".to_string(),
                price: KiloPrice::parse("3").unwrap(),
            }],
            vec![Order {
                id: OrderId::new(1),
                customer_id: CustomerId::new(1),
                date: "2024-07-12".to_string(),
                status: OrderStatus::Unpaid,
                order_description: "Three kilos for the party".to_string(),
            }],
        ));
        let service = ItemService::new(shop.clone());
        (shop, service)
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("orderDescription=Two = scoops").unwrap(),
            ("orderDescription".to_string(), "Two = scoops".to_string())
        );
        assert!(parse_field("price").is_err());
    }

    #[tokio::test]
    async fn test_add_prints_saved_record_and_listing() {
        let (shop, service) = service();
        let mut out = Vec::new();

        add(
            &service,
            "flavours",
            fields(&[("name", "Lemon"), ("price", "2.5")]),
            &mut out,
        )
        .await
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Saved flavour 2.\nFlavours\n"));
        assert!(text.contains("    Lemon\n    price: 2.5\n"));
        assert_eq!(shop.writes(), 1);
    }

    #[tokio::test]
    async fn test_rejected_add_prints_errors_before_listing() {
        let (shop, service) = service();
        let mut out = Vec::new();

        let err = add(
            &service,
            "flavours",
            fields(&[("name", "Vanilla"), ("price", "3")]),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Rejected(1)));
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("  * There's already a flavour called Vanilla\nFlavours\n"));
        assert_eq!(shop.writes(), 0);
    }

    #[tokio::test]
    async fn test_unknown_item_type() {
        let (_, service) = service();
        let mut out = Vec::new();

        let err = list(&service, "toppings", &mut out).await.unwrap_err();
        assert!(matches!(err, CommandError::Rejected(1)));
        assert_eq!(String::from_utf8(out).unwrap(), "  * Incorrect item type\n");
    }

    #[tokio::test]
    async fn test_delete_customer_with_orders_is_refused() {
        let (shop, service) = service();
        let mut out = Vec::new();

        let err = delete(&service, "customers", 1, &mut out).await.unwrap_err();
        assert!(matches!(err, CommandError::Rejected(1)));
        assert!(
            String::from_utf8(out)
                .unwrap()
                .contains("Customer \"Giulia\" cannot be deleted, they still have 1 orders.")
        );
        assert_eq!(shop.writes(), 0);
    }

    #[tokio::test]
    async fn test_show_order_names_customer() {
        let (_, service) = service();
        let mut out = Vec::new();

        show(&service, "orders", 1, &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[1]\n    customer: Giulia\n    date: 2024-07-12\n    status: unpaid\n    order description: Three kilos for the party\n"
        );
    }

    #[tokio::test]
    async fn test_update_then_delete_order() {
        let (shop, service) = service();
        let mut out = Vec::new();

        update(&service, "orders", 1, fields(&[("status", "delivered")]), &mut out)
            .await
            .unwrap();
        delete(&service, "orders", 1, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Saved order 1."));
        assert!(text.contains("Deleted order 1.\nOrders\n    (no orders yet)\n"));
        assert_eq!(shop.writes(), 2);
    }

    #[test]
    fn test_statuses() {
        let mut out = Vec::new();
        statuses(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "unpaid\npaid\ntransit\ndelivered\n"
        );
    }
}
