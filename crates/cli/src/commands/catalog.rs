//! Catalog management (admin).

use clap::Subcommand;
use tracing::info;

use gasdepot_core::{Product, Role};
use gasdepot_backend::repos::products::ProductPatch;

use super::{authenticate, open_backend};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List the catalog
    List,
    /// Add a product (admin)
    Add {
        /// Product id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Price in pesos
        #[arg(short, long)]
        price: i64,

        /// Description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Admin email
        #[arg(short, long)]
        email: String,

        /// Admin secret
        #[arg(short, long)]
        secret: String,
    },
    /// Update stock and visibility (admin)
    Update {
        /// Product id
        id: String,

        /// New stock count
        #[arg(long)]
        stock: Option<u32>,

        /// New visibility
        #[arg(long)]
        active: Option<bool>,

        /// New price in pesos
        #[arg(long)]
        price: Option<i64>,

        /// Admin email
        #[arg(short, long)]
        email: String,

        /// Admin secret
        #[arg(short, long)]
        secret: String,
    },
    /// Remove a product (admin)
    Remove {
        /// Product id
        id: String,

        /// Admin email
        #[arg(short, long)]
        email: String,

        /// Admin secret
        #[arg(short, long)]
        secret: String,
    },
}

pub fn run(action: CatalogAction) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, config) = open_backend()?;

    match action {
        CatalogAction::List => {
            for product in backend.products.get_all()? {
                let marker = if product.purchasable() { "" } else { " (unavailable)" };
                info!(
                    "{:<6} {:<24} ${:>8}  stock {:>3}{marker}",
                    product.id,
                    product.name,
                    product.price,
                    product.stock.unwrap_or(0),
                );
            }
        }
        CatalogAction::Add {
            id,
            name,
            price,
            description,
            stock,
            email,
            secret,
        } => {
            require_admin(&backend, &config, &email, &secret)?;
            backend.products.create(Product {
                id: id.clone(),
                name,
                price,
                description,
                image: format!("/img/{id}.png"),
                stock: Some(stock),
                is_active: Some(true),
            })?;
            info!("product {id} added");
        }
        CatalogAction::Update {
            id,
            stock,
            active,
            price,
            email,
            secret,
        } => {
            require_admin(&backend, &config, &email, &secret)?;
            let updated = backend.products.update(
                &id,
                ProductPatch {
                    stock,
                    is_active: active,
                    price,
                    ..ProductPatch::default()
                },
            )?;
            match updated {
                Some(p) => info!("product {} updated (purchasable: {})", p.id, p.purchasable()),
                None => info!("no product with id {id}"),
            }
        }
        CatalogAction::Remove { id, email, secret } => {
            require_admin(&backend, &config, &email, &secret)?;
            backend.products.delete(&id)?;
            info!("product {id} removed");
        }
    }
    Ok(())
}

fn require_admin(
    backend: &gasdepot_backend::Backend,
    config: &gasdepot_backend::config::Config,
    email: &str,
    secret: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let claims = authenticate(backend, config, email, secret)?;
    if claims.role == Role::Admin {
        Ok(())
    } else {
        Err(format!("catalog management requires the admin role, not {}", claims.role).into())
    }
}
