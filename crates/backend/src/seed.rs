//! Baseline datasets for seed-on-empty.
//!
//! A fresh store starts from these fixed records: one account per role and
//! the cylinder catalog. Orders start empty; they only ever come from
//! checkouts.

use gasdepot_core::{Email, Phone, Product, Role, Rut, UserProfile};

/// The three baseline accounts, one per role.
#[must_use]
pub fn baseline_profiles() -> Vec<UserProfile> {
    vec![
        profile(
            "11.111.111-1",
            "Juan Pérez",
            Role::Customer,
            "customer123",
            "customer@gasdepot.cl",
            "912345678",
        ),
        profile(
            "22.222.222-2",
            "Marcela Soto",
            Role::Admin,
            "admin123",
            "admin@gasdepot.cl",
            "987654321",
        ),
        profile(
            "33.333.333-3",
            "Pedro Ramírez",
            Role::Courier,
            "courier123",
            "courier@gasdepot.cl",
            "955555555",
        ),
    ]
}

/// The baseline cylinder catalog.
#[must_use]
pub fn baseline_products() -> Vec<Product> {
    vec![
        product(
            "g05",
            "5 kg gas cylinder",
            8_990,
            "Compact cylinder for camping stoves and small heaters.",
            12,
        ),
        product(
            "g11",
            "11 kg gas cylinder",
            16_490,
            "The household standard for kitchens and water heaters.",
            24,
        ),
        product(
            "g15",
            "15 kg gas cylinder",
            22_500,
            "Extended household supply for larger families.",
            18,
        ),
        product(
            "g45",
            "45 kg gas cylinder",
            50_200,
            "Stationary cylinder for commercial kitchens and boilers.",
            6,
        ),
    ]
}

fn profile(
    rut: &str,
    name: &str,
    role: Role,
    secret: &str,
    email: &str,
    phone: &str,
) -> UserProfile {
    UserProfile {
        rut: Rut::parse(rut).expect("baseline rut is valid"),
        name: name.to_owned(),
        role,
        secret: secret.to_owned(),
        email: Email::parse(email).expect("baseline email is valid"),
        phone: Phone::parse(phone).expect("baseline phone is valid"),
        addresses: None,
    }
}

fn product(id: &str, name: &str, price: i64, description: &str, stock: u32) -> Product {
    Product {
        id: id.to_owned(),
        name: name.to_owned(),
        price,
        description: description.to_owned(),
        image: format!("/img/{id}.png"),
        stock: Some(stock),
        is_active: Some(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_profiles_cover_every_role() {
        let profiles = baseline_profiles();
        assert_eq!(profiles.len(), 3);
        for role in [Role::Customer, Role::Admin, Role::Courier] {
            assert!(profiles.iter().any(|p| p.role == role));
        }
    }

    #[test]
    fn baseline_products_are_purchasable() {
        for product in baseline_products() {
            assert!(product.purchasable(), "{} not purchasable", product.id);
        }
    }
}
