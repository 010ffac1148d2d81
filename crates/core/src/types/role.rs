//! Actor roles.

use serde::{Deserialize, Serialize};

/// The three actor roles sharing the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Shops the catalog and places orders.
    Customer,
    /// Manages the catalog, accounts, and the order pipeline.
    Admin,
    /// Delivers dispatched orders assigned to them.
    Courier,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
            Self::Courier => write!(f, "courier"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "courier" => Ok(Self::Courier),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
