//! Status and payment enums for orders.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// `pending → preparing → dispatched → {delivered, delivery-failed}`;
/// the last two are terminal. Which transitions are legal for which actor
/// is decided by the backend's lifecycle rules, not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Placed at checkout, not yet picked up by the back office.
    #[default]
    Pending,
    /// Accepted by an admin and being prepared.
    Preparing,
    /// Handed to an assigned courier.
    Dispatched,
    /// Terminal: delivered to the customer.
    Delivered,
    /// Terminal: the courier could not complete delivery.
    DeliveryFailed,
}

impl OrderStatus {
    /// Whether this status ends the lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::DeliveryFailed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Preparing => write!(f, "preparing"),
            Self::Dispatched => write!(f, "dispatched"),
            Self::Delivered => write!(f, "delivered"),
            Self::DeliveryFailed => write!(f, "delivery-failed"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "dispatched" => Ok(Self::Dispatched),
            "delivered" => Ok(Self::Delivered),
            "delivery-failed" => Ok(Self::DeliveryFailed),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// How the customer pays at checkout. Payment itself is a no-op
/// simulation; the method is recorded on the order for the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Transfer,
    Card,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Transfer => write!(f, "transfer"),
            Self::Card => write!(f, "card"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "transfer" => Ok(Self::Transfer),
            "card" => Ok(Self::Card),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::DeliveryFailed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(!OrderStatus::Dispatched.is_terminal());
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&OrderStatus::DeliveryFailed).expect("serialize");
        assert_eq!(json, "\"delivery-failed\"");
        let back: OrderStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, OrderStatus::DeliveryFailed);
    }
}
