//! File-backed stores survive process restarts: reopening a backend over
//! the same directory must see every earlier write and must not re-seed
//! over live data.

use std::sync::Arc;

use gasdepot_backend::Backend;
use gasdepot_backend::lifecycle::Actor;
use gasdepot_backend::repos::orders::CheckoutRequest;
use gasdepot_backend::repos::products::ProductPatch;
use gasdepot_backend::storage::FileBackend;
use gasdepot_core::{OrderStatus, PaymentMethod, Role};

use gasdepot_integration_tests::seeded_profile;

fn open(dir: &std::path::Path) -> Backend {
    let storage = FileBackend::open(dir).expect("data dir");
    Backend::with_backend(Arc::new(storage))
}

#[test]
fn catalog_edits_survive_a_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    {
        let backend = open(dir.path());
        backend
            .products
            .update(
                "g11",
                ProductPatch {
                    price: Some(17_990),
                    ..ProductPatch::default()
                },
            )
            .expect("update")
            .expect("seeded product");
    }

    let reopened = open(dir.path());
    let product = reopened
        .products
        .get_by_id("g11")
        .expect("read")
        .expect("still there");
    assert_eq!(product.price, 17_990);

    // a populated collection is never re-seeded
    let catalog = reopened.products.get_all().expect("read");
    assert_eq!(catalog.iter().filter(|p| p.id == "g11").count(), 1);
}

#[test]
fn orders_and_status_changes_persist() {
    let dir = tempfile::tempdir().expect("tempdir");

    let order_id = {
        let backend = open(dir.path());
        let customer = seeded_profile(&backend, "customer@gasdepot.cl");
        let order = backend
            .orders
            .checkout(&CheckoutRequest {
                customer: &customer,
                items: &[gasdepot_integration_tests::line(
                    "g15",
                    "15 kg gas cylinder",
                    22_500,
                    2,
                )],
                payment_method: PaymentMethod::Transfer,
                address: "Pasaje Uno 12".to_owned(),
                comuna: Some("Ñuñoa".to_owned()),
                reference: None,
            })
            .expect("checkout");
        order.id
    };

    {
        let backend = open(dir.path());
        let admin = Actor::new(Role::Admin, "Marcela Soto");
        backend
            .orders
            .update_status(&order_id, OrderStatus::Preparing, &admin, None, None)
            .expect("prepare");
    }

    let backend = open(dir.path());
    let order = backend
        .orders
        .get_by_id(&order_id)
        .expect("read")
        .expect("persisted");
    assert_eq!(order.status, OrderStatus::Preparing);
    assert_eq!(order.total, 45_000);
    assert_eq!(order.items.len(), 1);
}

#[test]
fn two_handles_over_one_directory_see_each_other() {
    let dir = tempfile::tempdir().expect("tempdir");
    let writer = open(dir.path());
    let reader = open(dir.path());

    let customer = seeded_profile(&writer, "customer@gasdepot.cl");
    writer
        .orders
        .checkout(&CheckoutRequest {
            customer: &customer,
            items: &[gasdepot_integration_tests::line(
                "g05",
                "5 kg gas cylinder",
                8_990,
                1,
            )],
            payment_method: PaymentMethod::Cash,
            address: "Calle Tres 3".to_owned(),
            comuna: None,
            reference: None,
        })
        .expect("checkout");

    assert_eq!(reader.orders.get_all().expect("read").len(), 1);
}
