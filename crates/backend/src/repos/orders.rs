//! Order repository.
//!
//! Orders are created once at checkout and then mutated only through
//! status transitions. Transition legality is enforced here, against the
//! table in [`crate::lifecycle`], so a buggy or hostile caller cannot
//! push an order along an edge the table does not have.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};
use uuid::Uuid;

use gasdepot_core::{CartItem, Order, OrderItem, OrderStatus, PaymentMethod, Rut, UserProfile};

use crate::lifecycle::{self, Actor, TransitionError};
use crate::storage::StorageBackend;
use crate::store::{Record, RecordStore, RepositoryError};

impl Record for Order {
    const COLLECTION: &'static str = "gasdepot_orders";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Errors from order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// No order exists under the given id.
    #[error("no order with id {0}")]
    NotFound(String),
    /// Checkout with an empty cart.
    #[error("cannot place an order with no items")]
    EmptyCart,
    /// The requested status change violates the lifecycle table.
    #[error(transparent)]
    Transition(#[from] TransitionError),
    /// The underlying store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What a customer brings to checkout.
#[derive(Debug, Clone)]
pub struct CheckoutRequest<'a> {
    /// The purchasing customer.
    pub customer: &'a UserProfile,
    /// Cart lines to freeze onto the order.
    pub items: &'a [CartItem],
    /// Chosen payment method (payment itself is simulated).
    pub payment_method: PaymentMethod,
    /// Free-form delivery address.
    pub address: String,
    /// Structured comuna, if the customer picked one.
    pub comuna: Option<String>,
    /// Extra directions for the courier.
    pub reference: Option<String>,
}

/// Order repository keyed by order id.
#[derive(Clone)]
pub struct OrderRepository {
    store: RecordStore<Order>,
}

impl OrderRepository {
    /// Repository over the given backend. Orders have no seed; a fresh
    /// store starts with none.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: RecordStore::new(backend, Vec::new()),
        }
    }

    /// All orders in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        self.store.get_all()
    }

    /// The order with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Order>, RepositoryError> {
        self.store.get(id)
    }

    /// Orders placed by the given customer, in no particular order;
    /// callers sort by date when they care.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_by_customer(&self, rut: &Rut) -> Result<Vec<Order>, RepositoryError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|o| o.customer_rut == *rut)
            .collect())
    }

    /// Persist an already-built order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateKey`] if the id exists. Ids are
    /// generated by [`Self::checkout`]; a collision is not retried, it
    /// fails closed.
    pub fn create(&self, order: Order) -> Result<(), RepositoryError> {
        self.store.create(order)
    }

    /// Freeze the cart into a new pending order and persist it.
    ///
    /// Line items are a snapshot: later catalog edits do not touch them.
    /// The total is computed here from the frozen lines.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] for a cart with no lines, or a
    /// repository error from the write.
    #[instrument(skip(self, request), fields(customer = %request.customer.rut))]
    pub fn checkout(&self, request: &CheckoutRequest<'_>) -> Result<Order, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items: Vec<OrderItem> = request
            .items
            .iter()
            .map(|line| OrderItem {
                id: line.id.clone(),
                name: line.name.clone(),
                price: line.price,
                qty: line.qty,
            })
            .collect();
        let total = items.iter().map(|i| i.price * i64::from(i.qty)).sum();

        let order = Order {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            customer_rut: request.customer.rut.clone(),
            customer_name: request.customer.name.clone(),
            items,
            total,
            status: OrderStatus::Pending,
            payment_method: request.payment_method,
            address: request.address.clone(),
            comuna: request.comuna.clone(),
            reference: request.reference.clone(),
            assigned_to: None,
            fail_reason: None,
        };

        self.create(order.clone())?;
        debug!(order = %order.id, total = order.total, "order placed");
        Ok(order)
    }

    /// Apply a status transition on behalf of an actor.
    ///
    /// `courier` carries the assignment for a dispatch; `fail_reason`
    /// carries the reason for a delivery failure. Status, assignment, and
    /// reason are merged into the stored order; every other field is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] for an unknown id and
    /// [`OrderError::Transition`] when the lifecycle table rejects the
    /// change; the stored order is untouched in both cases.
    #[instrument(skip(self, actor), fields(actor = %actor.name, role = %actor.role))]
    pub fn update_status(
        &self,
        id: &str,
        new_status: OrderStatus,
        actor: &Actor,
        courier: Option<&str>,
        fail_reason: Option<&str>,
    ) -> Result<Order, OrderError> {
        let order = self
            .get_by_id(id)?
            .ok_or_else(|| OrderError::NotFound(id.to_owned()))?;

        lifecycle::authorize(&order, new_status, actor, courier, fail_reason)?;

        let updated = self.store.update(id, |o| {
            o.status = new_status;
            if let Some(courier) = courier {
                o.assigned_to = Some(courier.to_owned());
            }
            if let Some(reason) = fail_reason {
                o.fail_reason = Some(reason.to_owned());
            }
        })?;

        debug!(order = id, status = %new_status, "order status updated");
        updated.ok_or_else(|| OrderError::NotFound(id.to_owned()))
    }

    /// Remove an order. Administrative cleanup only; idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.store.delete(id)
    }
}
