//! End-to-end flow: login, browse, checkout, and walk an order through
//! the pipeline as three different actors sharing one store.

use gasdepot_backend::Backend;
use gasdepot_backend::cart::Cart;
use gasdepot_backend::lifecycle::Actor;
use gasdepot_backend::repos::orders::{CheckoutRequest, OrderError};
use gasdepot_backend::session::Session;
use gasdepot_core::{OrderStatus, PaymentMethod, Role, Rut};

use gasdepot_integration_tests::{seeded_profile, test_tokens};

#[test]
fn customer_order_travels_the_whole_pipeline() {
    let backend = Backend::in_memory();

    // customer logs in and fills a cart from the catalog
    let mut session = Session::new(test_tokens());
    let claims = session
        .login(&backend.profiles, "customer@gasdepot.cl", "customer123")
        .expect("login");
    assert_eq!(claims.role, Role::Customer);

    let mut cart = Cart::new();
    let catalog = backend.products.get_all().expect("catalog");
    let small = catalog.iter().find(|p| p.id == "g11").expect("seeded");
    let big = catalog.iter().find(|p| p.id == "g45").expect("seeded");
    cart.add(small);
    cart.add(small);
    cart.add(big);
    assert_eq!(cart.item_count(), 3);

    let customer = seeded_profile(&backend, "customer@gasdepot.cl");
    let order = backend
        .orders
        .checkout(&CheckoutRequest {
            customer: &customer,
            items: cart.items(),
            payment_method: PaymentMethod::Card,
            address: "Av. Siempre Viva 742".to_owned(),
            comuna: Some("Concepción".to_owned()),
            reference: Some("blue gate".to_owned()),
        })
        .expect("checkout");
    cart.clear();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total, small.price * 2 + big.price);

    // admin picks it up and dispatches it to the seeded courier
    let admin_profile = seeded_profile(&backend, "admin@gasdepot.cl");
    let admin = Actor::new(Role::Admin, admin_profile.name);
    backend
        .orders
        .update_status(&order.id, OrderStatus::Preparing, &admin, None, None)
        .expect("prepare");

    let courier_profile = seeded_profile(&backend, "courier@gasdepot.cl");
    backend
        .orders
        .update_status(
            &order.id,
            OrderStatus::Dispatched,
            &admin,
            Some(&courier_profile.name),
            None,
        )
        .expect("dispatch");

    // the wrong courier cannot touch it
    let impostor = Actor::new(Role::Courier, "Someone Else");
    let err = backend
        .orders
        .update_status(&order.id, OrderStatus::Delivered, &impostor, None, None)
        .expect_err("not assigned");
    assert!(matches!(err, OrderError::Transition(_)));

    // the assigned courier delivers
    let courier = Actor::new(Role::Courier, courier_profile.name);
    let delivered = backend
        .orders
        .update_status(&order.id, OrderStatus::Delivered, &courier, None, None)
        .expect("deliver");
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // terminal: nothing moves it again
    let err = backend
        .orders
        .update_status(&order.id, OrderStatus::Preparing, &admin, None, None)
        .expect_err("terminal");
    assert!(matches!(err, OrderError::Transition(_)));

    // the customer sees exactly their own order history
    let history = backend
        .orders
        .get_by_customer(&customer.rut)
        .expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Delivered);
}

#[test]
fn delivery_failed_is_a_dead_end() {
    let backend = Backend::in_memory();
    let customer = seeded_profile(&backend, "customer@gasdepot.cl");
    let order = backend
        .orders
        .checkout(&CheckoutRequest {
            customer: &customer,
            items: &[gasdepot_integration_tests::line("g05", "5 kg gas cylinder", 8_990, 1)],
            payment_method: PaymentMethod::Cash,
            address: "Calle Dos 456".to_owned(),
            comuna: None,
            reference: None,
        })
        .expect("checkout");

    let admin = Actor::new(Role::Admin, "Marcela Soto");
    let courier = Actor::new(Role::Courier, "Pedro Ramírez");
    backend
        .orders
        .update_status(&order.id, OrderStatus::Preparing, &admin, None, None)
        .expect("prepare");
    backend
        .orders
        .update_status(
            &order.id,
            OrderStatus::Dispatched,
            &admin,
            Some("Pedro Ramírez"),
            None,
        )
        .expect("dispatch");
    let failed = backend
        .orders
        .update_status(
            &order.id,
            OrderStatus::DeliveryFailed,
            &courier,
            None,
            Some("address does not exist"),
        )
        .expect("fail");
    assert_eq!(failed.fail_reason.as_deref(), Some("address does not exist"));

    // no way back into the pipeline, for anyone
    for (actor, target) in [
        (&admin, OrderStatus::Preparing),
        (&admin, OrderStatus::Dispatched),
        (&courier, OrderStatus::Delivered),
        (&courier, OrderStatus::Pending),
    ] {
        let err = backend
            .orders
            .update_status(&order.id, target, actor, Some("x"), Some("y"))
            .expect_err("terminal");
        assert!(matches!(err, OrderError::Transition(_)));
    }
}

#[test]
fn customer_identity_is_checked_against_rut_key() {
    let backend = Backend::in_memory();
    let customer = seeded_profile(&backend, "customer@gasdepot.cl");
    backend
        .orders
        .checkout(&CheckoutRequest {
            customer: &customer,
            items: &[gasdepot_integration_tests::line("g05", "5 kg gas cylinder", 8_990, 1)],
            payment_method: PaymentMethod::Cash,
            address: "Calle Dos 456".to_owned(),
            comuna: None,
            reference: None,
        })
        .expect("checkout");

    // separators and case never matter for RUT identity
    let dotted = Rut::parse("11.111.111-1").expect("valid");
    let bare = Rut::parse("111111111").expect("valid");
    assert_eq!(dotted, bare);
    assert_eq!(
        backend.orders.get_by_customer(&bare).expect("read").len(),
        1
    );
}
