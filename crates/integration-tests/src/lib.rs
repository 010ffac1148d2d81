//! Shared helpers for GasDepot integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;

use gasdepot_backend::Backend;
use gasdepot_backend::session::TokenService;
use gasdepot_core::{CartItem, UserProfile};

/// Token service over a fixed test secret.
#[must_use]
pub fn test_tokens() -> TokenService {
    TokenService::new(SecretString::from("integration-test-signing-secret".to_owned()))
}

/// The seeded account for the given login email.
///
/// # Panics
///
/// Panics when the email matches no baseline account.
#[must_use]
pub fn seeded_profile(backend: &Backend, email: &str) -> UserProfile {
    backend
        .profiles
        .get_all()
        .expect("profiles readable")
        .into_iter()
        .find(|p| p.email.matches(email))
        .expect("baseline account present")
}

/// A cart line for one of the seeded products.
#[must_use]
pub fn line(id: &str, name: &str, price: i64, qty: u32) -> CartItem {
    CartItem {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
        qty,
        image: None,
    }
}
