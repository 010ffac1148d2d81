//! Repositories over the generic record store.
//!
//! Each repository owns one named collection and layers its own invariants
//! on top of the store: phone validation and credential checks for
//! profiles, nothing extra for products, transition legality for orders.

pub mod orders;
pub mod products;
pub mod profiles;

pub use orders::{CheckoutRequest, OrderError, OrderRepository};
pub use products::{ProductPatch, ProductRepository};
pub use profiles::{CredentialError, NewProfile, ProfilePatch, ProfileRepository};
