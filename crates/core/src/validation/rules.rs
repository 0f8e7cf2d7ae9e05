//! Rule constants and violation messages.

use rust_decimal::Decimal;

use super::Violation;
use crate::types::ItemType;

/// Cheapest allowed kilogram price (0.5).
pub const FLAVOUR_LOWEST_PRICE: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Most expensive allowed kilogram price (10).
pub const FLAVOUR_HIGHEST_PRICE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
pub const FLAVOUR_NAME_MIN_LENGTH: usize = 2;
pub const ORDER_DESCRIPTION_MIN_LENGTH: usize = 8;

pub(crate) fn duplicate_flavour(name: &str) -> Violation {
    Violation::new(format!("There's already a flavour called {name}"))
}

pub(crate) fn flavour_name_too_short() -> Violation {
    Violation::new(format!(
        "The name of an icecream flavour needs to be at least {FLAVOUR_NAME_MIN_LENGTH} characters long"
    ))
}

pub(crate) fn flavour_name_not_letters() -> Violation {
    Violation::new(
        "The name of an icecream flavour can only consist of the letters a to z and spaces in between.",
    )
}

pub(crate) fn price_not_a_number() -> Violation {
    Violation::new("The price needs to be a number.")
}

pub(crate) fn price_out_of_range() -> Violation {
    Violation::new(format!(
        "The price of a kilo of icecream needs to be between {FLAVOUR_LOWEST_PRICE} and {FLAVOUR_HIGHEST_PRICE}."
    ))
}

pub(crate) fn customer_not_selected() -> Violation {
    Violation::new("Please select a customer for this order.")
}

pub(crate) fn date_required() -> Violation {
    Violation::new("Date is a required field")
}

pub(crate) fn status_invalid() -> Violation {
    Violation::new("The given status is not valid.")
}

pub(crate) fn description_too_short() -> Violation {
    Violation::new(format!(
        "The description of an order needs to be at least {ORDER_DESCRIPTION_MIN_LENGTH} characters long"
    ))
}

pub(crate) fn customer_has_orders(name: &str, count: usize) -> Violation {
    Violation::new(format!(
        "Customer \"{name}\" cannot be deleted, they still have {count} orders."
    ))
}

pub(crate) fn order_not_delivered() -> Violation {
    Violation::new("That order cannot be deleted. Only delivered orders can be deleted.")
}

pub(crate) fn incorrect_item_type() -> Violation {
    Violation::new("Incorrect item type")
}

pub(crate) fn not_found(item_type: ItemType, id: i32) -> Violation {
    let singular = item_type.singular();
    let mut label = String::with_capacity(singular.len());
    let mut chars = singular.chars();
    if let Some(first) = chars.next() {
        label.extend(first.to_uppercase());
        label.push_str(chars.as_str());
    }
    Violation::new(format!("{label} {id} does not exist."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_message_shows_plain_bounds() {
        assert_eq!(
            price_out_of_range().as_str(),
            "The price of a kilo of icecream needs to be between 0.5 and 10."
        );
    }

    #[test]
    fn test_not_found_capitalizes_type() {
        assert_eq!(
            not_found(ItemType::Orders, 12).as_str(),
            "Order 12 does not exist."
        );
    }
}
