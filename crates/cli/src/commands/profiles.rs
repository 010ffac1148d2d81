//! Account management.

use clap::Subcommand;
use tracing::info;

use gasdepot_core::{Email, Role, Rut};
use gasdepot_backend::repos::profiles::NewProfile;

use super::open_backend;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List accounts
    List,
    /// Register a new account
    Register {
        /// National identity number (RUT)
        #[arg(long)]
        rut: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Role: customer, admin, courier
        #[arg(short, long, default_value = "customer")]
        role: Role,

        /// Login email
        #[arg(short, long)]
        email: String,

        /// Account secret
        #[arg(short, long)]
        secret: String,

        /// Phone number (9 digits)
        #[arg(short, long)]
        phone: String,
    },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, _config) = open_backend()?;

    match action {
        ProfileAction::List => {
            for profile in backend.profiles.get_all()? {
                info!(
                    "{:<14} {:<20} {:<9} {}",
                    profile.rut.formatted(),
                    profile.name,
                    profile.role,
                    profile.email,
                );
            }
        }
        ProfileAction::Register {
            rut,
            name,
            role,
            email,
            secret,
            phone,
        } => {
            let profile = backend.profiles.create(NewProfile {
                rut: Rut::parse(&rut)?,
                name,
                role,
                secret,
                email: Email::parse(&email)?,
                phone,
                addresses: None,
            })?;
            info!("registered {} as {}", profile.rut.formatted(), profile.role);
        }
    }
    Ok(())
}
