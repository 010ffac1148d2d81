//! Domain records persisted by the backend repositories.
//!
//! Each record type carries its own unique key (`rut` for profiles, `id`
//! for products and orders). Prices are integer Chilean pesos; there are
//! no fractional currency units in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, OrderStatus, PaymentMethod, Phone, Role, Rut};

/// A saved delivery address on a customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Unique within the owning profile.
    pub id: String,
    /// Short label the customer picked ("home", "office").
    pub alias: String,
    /// Street and number.
    pub street: String,
    /// Comuna (municipal district).
    pub comuna: String,
    /// Optional extra directions for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// An account, keyed by RUT.
///
/// The secret is plaintext: the whole backend is a local simulation and
/// there is no server to hold a hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// National identity number; the unique key.
    pub rut: Rut,
    /// Display name.
    pub name: String,
    /// Actor role.
    pub role: Role,
    /// Plaintext credential.
    pub secret: String,
    /// Login email.
    pub email: Email,
    /// Contact phone.
    pub phone: Phone,
    /// Saved delivery addresses, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
}

/// A catalog entry, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Price in integer pesos.
    pub price: i64,
    /// Marketing description.
    pub description: String,
    /// Image reference for the storefront.
    pub image: String,
    /// Units on hand; absent means unknown/untracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    /// Whether the product is offered at all; absent means visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Product {
    /// Whether the storefront may offer this product for purchase:
    /// stock above zero and not explicitly deactivated.
    #[must_use]
    pub fn purchasable(&self) -> bool {
        self.stock.is_some_and(|s| s > 0) && self.is_active != Some(false)
    }
}

/// A line item frozen onto an order at checkout.
///
/// Snapshot of the product at purchase time; later catalog edits do not
/// touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product id at the time of purchase.
    pub id: String,
    /// Product name at the time of purchase.
    pub name: String,
    /// Unit price in pesos at the time of purchase.
    pub price: i64,
    /// Units ordered.
    pub qty: u32,
}

/// A customer order, keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order key, generated at checkout.
    pub id: String,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    /// Who placed it.
    pub customer_rut: Rut,
    /// Customer display name, denormalized for the back office.
    pub customer_name: String,
    /// Frozen line items.
    pub items: Vec<OrderItem>,
    /// Sum of `price * qty` over the items, in pesos.
    pub total: i64,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// How the customer chose to pay.
    pub payment_method: PaymentMethod,
    /// Free-form delivery address.
    pub address: String,
    /// Structured comuna, when the customer provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comuna: Option<String>,
    /// Extra directions for the courier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Courier display name, set when the order is dispatched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Why delivery failed; only meaningful in the delivery-failed state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_reason: Option<String>,
}

/// A line in the ephemeral cart. Not a business record; working state for
/// one browsing session, converted into [`OrderItem`]s at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Unit price in pesos.
    pub price: i64,
    /// Units in the cart.
    pub qty: u32,
    /// Image reference, when the storefront wants a thumbnail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: Option<u32>, is_active: Option<bool>) -> Product {
        Product {
            id: "g15".to_owned(),
            name: "15 kg cylinder".to_owned(),
            price: 22_500,
            description: String::new(),
            image: String::new(),
            stock,
            is_active,
        }
    }

    #[test]
    fn purchasable_needs_stock_and_active() {
        assert!(product(Some(3), None).purchasable());
        assert!(product(Some(3), Some(true)).purchasable());
        assert!(!product(Some(0), None).purchasable());
        assert!(!product(None, None).purchasable());
        assert!(!product(Some(3), Some(false)).purchasable());
    }
}
