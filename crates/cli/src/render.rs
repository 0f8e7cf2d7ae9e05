//! Plain-text rendering of records and violation messages.

use std::fmt::Write;

use zia_mia_core::{Customer, ItemType, Record};

/// Display label of a record field.
fn label(field: &str) -> &str {
    match field {
        "customerId" => "customer",
        "orderDescription" => "order description",
        other => other,
    }
}

/// Property lines of one record.
///
/// `name` is shown bare, every other field as `label: value`. An order's
/// customer is shown by name when it can be found in `customers`.
pub fn record_lines(record: &Record, customers: &[Customer]) -> Vec<String> {
    let customer_name = |raw: &str| {
        customers
            .iter()
            .find(|c| c.id.to_string() == raw)
            .map_or_else(|| format!("#{raw}"), |c| c.name.clone())
    };

    record
        .fields()
        .into_iter()
        .map(|(field, value)| match field {
            "name" => value,
            "customerId" => format!("{}: {}", label(field), customer_name(&value)),
            _ => format!("{}: {value}", label(field)),
        })
        .collect()
}

/// Violation messages as a bullet list, one per line.
pub fn errors<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    messages.into_iter().fold(String::new(), |mut out, message| {
        let _ = writeln!(out, "  * {message}");
        out
    })
}

/// A record with its id heading and indented properties.
pub fn record(record: &Record, customers: &[Customer]) -> String {
    let mut out = format!("[{}]\n", record.id());
    for line in record_lines(record, customers) {
        let _ = writeln!(out, "    {line}");
    }
    out
}

/// A full listing of one item type.
pub fn list(item_type: ItemType, records: &[Record], customers: &[Customer]) -> String {
    let mut out = format!("{}\n", capitalize(item_type.as_str()));
    if records.is_empty() {
        let _ = writeln!(out, "    (no {item_type} yet)");
    }
    for item in records {
        out.push_str(&record(item, customers));
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zia_mia_core::{
        CustomerId, Flavour, FlavourId, KiloPrice, Order, OrderId, OrderStatus,
    };

    use super::*;

    fn giulia() -> Customer {
        Customer {
            id: CustomerId::new(1),
            name: "Giulia".to_string(),
            email: "giulia@example.com".to_string(),
        }
    }

    fn order(customer_id: i32) -> Record {
        Record::Order(Order {
            id: OrderId::new(5),
            customer_id: CustomerId::new(customer_id),
            date: "2024-07-12".to_string(),
            status: OrderStatus::Paid,
            order_description: "Three kilos for the party".to_string(),
        })
    }

    #[test]
    fn test_name_is_shown_bare() {
        let flavour = Record::Flavour(Flavour {
            id: FlavourId::new(2),
            name: "Pistachio".to_string(),
            price: KiloPrice::parse("4.50").unwrap(),
        });
        assert_eq!(record_lines(&flavour, &[]), ["Pistachio", "price: 4.5"]);
    }

    #[test]
    fn test_order_shows_customer_name_and_labels() {
        assert_eq!(
            record_lines(&order(1), &[giulia()]),
            [
                "customer: Giulia",
                "date: 2024-07-12",
                "status: paid",
                "order description: Three kilos for the party",
            ]
        );
    }

    #[test]
    fn test_unknown_customer_falls_back_to_id() {
        let lines = record_lines(&order(9), &[giulia()]);
        assert_eq!(lines.first().unwrap(), "customer: #9");
    }

    #[test]
    fn test_errors_are_bulleted() {
        assert_eq!(
            errors(["Date is a required field", "The given status is not valid."]),
            "  * Date is a required field\n  * The given status is not valid.\n"
        );
    }

    #[test]
    fn test_list_layout() {
        let customer = Record::Customer(giulia());
        assert_eq!(
            list(ItemType::Customers, &[customer], &[]),
            "Customers\n[1]\n    Giulia\n    email: giulia@example.com\n"
        );
        assert_eq!(list(ItemType::Orders, &[], &[]), "Orders\n    (no orders yet)\n");
    }
}
