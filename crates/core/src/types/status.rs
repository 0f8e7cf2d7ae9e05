//! Order status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The set is fixed and ordered. Only membership is enforced; any status may
/// follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Unpaid,
    Paid,
    Transit,
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Unpaid, Self::Paid, Self::Transit, Self::Delivered];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Paid => "paid",
            Self::Transit => "transit",
            Self::Delivered => "delivered",
        }
    }

    /// Only delivered orders may be removed from the store.
    #[must_use]
    pub const fn is_deletable(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// The ordered list of valid order statuses, as offered in forms.
#[must_use]
pub fn order_statuses() -> Vec<&'static str> {
    OrderStatus::ALL.iter().map(OrderStatus::as_str).collect()
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(Self::Unpaid),
            "paid" => Ok(Self::Paid),
            "transit" => Ok(Self::Transit),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}
