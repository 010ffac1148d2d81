//! Order placement and pipeline management.

use clap::Subcommand;
use tracing::info;

use gasdepot_core::{OrderStatus, PaymentMethod, Role, Rut};
use gasdepot_backend::cart::Cart;
use gasdepot_backend::lifecycle::{self, Actor};
use gasdepot_backend::repos::orders::CheckoutRequest;

use super::{authenticate, open_backend};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders: all for admin/courier, own for a customer
    List {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Account secret
        #[arg(short, long)]
        secret: String,
    },
    /// Place an order from cart lines (customer)
    Place {
        /// Cart line as product-id:qty, repeatable
        #[arg(short, long = "item", required = true)]
        items: Vec<String>,

        /// Payment method: cash, transfer, card
        #[arg(short, long, default_value = "cash")]
        payment: PaymentMethod,

        /// Delivery address
        #[arg(short, long)]
        address: String,

        /// Comuna
        #[arg(long)]
        comuna: Option<String>,

        /// Extra directions for the courier
        #[arg(long)]
        reference: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: String,

        /// Account secret
        #[arg(short, long)]
        secret: String,
    },
    /// Advance an order to a new status
    Advance {
        /// Order id
        id: String,

        /// Target status: preparing, dispatched, delivered, delivery-failed
        status: OrderStatus,

        /// Courier assignment (required for dispatched)
        #[arg(long)]
        courier: Option<String>,

        /// Failure reason (required for delivery-failed)
        #[arg(long)]
        reason: Option<String>,

        /// Login email
        #[arg(short, long)]
        email: String,

        /// Account secret
        #[arg(short, long)]
        secret: String,
    },
}

pub fn run(action: OrderAction) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, config) = open_backend()?;

    match action {
        OrderAction::List { email, secret } => {
            let claims = authenticate(&backend, &config, &email, &secret)?;
            let mut orders = if claims.role == Role::Customer {
                backend.orders.get_by_customer(&Rut::parse(&claims.rut)?)?
            } else {
                backend.orders.get_all()?
            };
            orders.sort_by_key(|o| o.date);

            for order in orders {
                let assigned = order.assigned_to.as_deref().unwrap_or("-");
                info!(
                    "{}  {}  {:<15} ${:>8}  courier: {}",
                    order.id, order.date, order.status, order.total, assigned,
                );
                if claims.role != Role::Customer {
                    let targets = lifecycle::allowed_targets(order.status, claims.role);
                    if !targets.is_empty() {
                        info!("  next: {targets:?}");
                    }
                }
            }
        }
        OrderAction::Place {
            items,
            payment,
            address,
            comuna,
            reference,
            email,
            secret,
        } => {
            let claims = authenticate(&backend, &config, &email, &secret)?;
            let customer = backend
                .profiles
                .get_by_rut(&Rut::parse(&claims.rut)?)?
                .ok_or("profile vanished between login and checkout")?;

            let mut cart = Cart::new();
            for raw in items {
                let (id, qty) = parse_line(&raw)?;
                let product = backend
                    .products
                    .get_by_id(id)?
                    .ok_or_else(|| format!("no product with id {id}"))?;
                if !product.purchasable() {
                    return Err(format!("product {id} is not available").into());
                }
                for _ in 0..qty {
                    cart.add(&product);
                }
            }
            info!("cart: {} items, total ${}", cart.item_count(), cart.total());

            let order = backend.orders.checkout(&CheckoutRequest {
                customer: &customer,
                items: cart.items(),
                payment_method: payment,
                address,
                comuna,
                reference,
            })?;
            cart.clear();
            info!("order {} placed, total ${}", order.id, order.total);
        }
        OrderAction::Advance {
            id,
            status,
            courier,
            reason,
            email,
            secret,
        } => {
            let claims = authenticate(&backend, &config, &email, &secret)?;
            let actor = Actor::new(claims.role, claims_name(&backend, &claims)?);
            let order = backend.orders.update_status(
                &id,
                status,
                &actor,
                courier.as_deref(),
                reason.as_deref(),
            )?;
            info!("order {} is now {}", order.id, order.status);
        }
    }
    Ok(())
}

/// Parse a `product-id:qty` cart line; a bare id means quantity 1.
fn parse_line(raw: &str) -> Result<(&str, u32), Box<dyn std::error::Error>> {
    match raw.split_once(':') {
        Some((id, qty)) => {
            let qty: u32 = qty
                .parse()
                .map_err(|_| format!("bad quantity in cart line {raw:?}"))?;
            if qty == 0 {
                return Err(format!("quantity must be at least 1 in {raw:?}").into());
            }
            Ok((id, qty))
        }
        None => Ok((raw, 1)),
    }
}

/// Transitions are matched on display name, so resolve it from the
/// profile rather than trusting the claims snapshot.
fn claims_name(
    backend: &gasdepot_backend::Backend,
    claims: &gasdepot_backend::session::Claims,
) -> Result<String, Box<dyn std::error::Error>> {
    let profile = backend
        .profiles
        .get_by_rut(&Rut::parse(&claims.rut)?)?
        .ok_or("profile vanished after login")?;
    Ok(profile.name)
}
