//! Order lifecycle rules.
//!
//! The status graph is `pending → preparing → dispatched → {delivered,
//! delivery-failed}`. Every transition is gated on an actor:
//!
//! | From       | To              | Actor                  | Extra precondition       |
//! |------------|-----------------|------------------------|--------------------------|
//! | pending    | preparing       | admin                  | —                        |
//! | preparing  | dispatched      | admin                  | courier name supplied    |
//! | dispatched | delivered       | the assigned courier   | —                        |
//! | dispatched | delivery-failed | the assigned courier   | non-empty failure reason |
//!
//! Anything outside the table is rejected with a typed error. There is no
//! reassignment and no way back out of a terminal state; in particular
//! `delivery-failed` cannot re-enter the pipeline.
//!
//! [`authorize`] is the single source of truth. The order repository runs
//! it before persisting a status change; UI collaborators can call
//! [`allowed_targets`] to know which actions to offer.

use gasdepot_core::{Order, OrderStatus, Role};

/// Who is attempting a transition.
#[derive(Debug, Clone)]
pub struct Actor {
    /// The actor's role.
    pub role: Role,
    /// Display name; couriers are matched against `assigned_to` by name.
    pub name: String,
}

impl Actor {
    /// Convenience constructor.
    #[must_use]
    pub fn new(role: Role, name: impl Into<String>) -> Self {
        Self {
            role,
            name: name.into(),
        }
    }
}

/// A rejected status transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The status graph has no edge from `from` to `to`.
    #[error("no transition from {from} to {to}")]
    Illegal {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
    /// The edge exists but belongs to a different role.
    #[error("moving an order from {from} to {to} requires the {required} role")]
    WrongRole {
        /// Role the table assigns to this edge.
        required: Role,
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
    /// Dispatching without naming a courier.
    #[error("dispatching an order requires a courier assignment")]
    MissingCourier,
    /// Failing a delivery without a reason.
    #[error("marking a delivery failed requires a non-empty reason")]
    MissingFailReason,
    /// A courier acting on an order assigned to someone else (or nobody).
    #[error("order is not assigned to this courier")]
    NotAssigned,
}

/// Check a transition against the table.
///
/// `courier` is the assignment supplied alongside a dispatch;
/// `fail_reason` accompanies a delivery failure. Both are ignored on edges
/// that do not use them.
///
/// # Errors
///
/// Returns a [`TransitionError`] describing exactly which rule failed;
/// nothing is mutated.
pub fn authorize(
    order: &Order,
    to: OrderStatus,
    actor: &Actor,
    courier: Option<&str>,
    fail_reason: Option<&str>,
) -> Result<(), TransitionError> {
    let from = order.status;
    match (from, to) {
        (OrderStatus::Pending, OrderStatus::Preparing) => require_role(Role::Admin, actor, from, to),
        (OrderStatus::Preparing, OrderStatus::Dispatched) => {
            require_role(Role::Admin, actor, from, to)?;
            if courier.is_none_or(|c| c.trim().is_empty()) {
                return Err(TransitionError::MissingCourier);
            }
            Ok(())
        }
        (OrderStatus::Dispatched, OrderStatus::Delivered) => require_assigned_courier(order, actor),
        (OrderStatus::Dispatched, OrderStatus::DeliveryFailed) => {
            require_assigned_courier(order, actor)?;
            if fail_reason.is_none_or(|r| r.trim().is_empty()) {
                return Err(TransitionError::MissingFailReason);
            }
            Ok(())
        }
        _ => Err(TransitionError::Illegal { from, to }),
    }
}

/// Statuses an actor of the given role could move this order to, assuming
/// the side conditions (assignment, reason) are met. Couriers still need
/// to be the assigned one; this only looks at the table shape.
#[must_use]
pub fn allowed_targets(from: OrderStatus, role: Role) -> &'static [OrderStatus] {
    match (from, role) {
        (OrderStatus::Pending, Role::Admin) => &[OrderStatus::Preparing],
        (OrderStatus::Preparing, Role::Admin) => &[OrderStatus::Dispatched],
        (OrderStatus::Dispatched, Role::Courier) => {
            &[OrderStatus::Delivered, OrderStatus::DeliveryFailed]
        }
        _ => &[],
    }
}

fn require_role(
    required: Role,
    actor: &Actor,
    from: OrderStatus,
    to: OrderStatus,
) -> Result<(), TransitionError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(TransitionError::WrongRole { required, from, to })
    }
}

fn require_assigned_courier(order: &Order, actor: &Actor) -> Result<(), TransitionError> {
    if actor.role != Role::Courier {
        return Err(TransitionError::WrongRole {
            required: Role::Courier,
            from: order.status,
            to: order.status,
        });
    }
    if order.assigned_to.as_deref() != Some(actor.name.as_str()) {
        return Err(TransitionError::NotAssigned);
    }
    Ok(())
}
