//! GasDepot CLI - the stand-in for the storefront UI.
//!
//! # Usage
//!
//! ```bash
//! # Populate a fresh data directory with the baseline datasets
//! gasdepot seed
//!
//! # Browse the catalog
//! gasdepot catalog list
//!
//! # Log in and print a session token
//! gasdepot login -e customer@gasdepot.cl -s customer123
//!
//! # Place an order as a customer
//! gasdepot orders place -e customer@gasdepot.cl -s customer123 \
//!     -i g11:2 -i g45:1 -p transfer -a "Calle Uno 123"
//!
//! # Move an order through the pipeline
//! gasdepot orders advance <id> preparing -e admin@gasdepot.cl -s admin123
//! gasdepot orders advance <id> dispatched -e admin@gasdepot.cl -s admin123 \
//!     --courier "Pedro Ramírez"
//! gasdepot orders advance <id> delivered -e courier@gasdepot.cl -s courier123
//! ```
//!
//! # Commands
//!
//! - `seed` - Force-populate the baseline datasets
//! - `catalog` - List/add/update/remove products (admin)
//! - `profiles` - List accounts, register new ones
//! - `orders` - Place, list, and advance orders
//! - `login` - Check credentials and print a token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gasdepot")]
#[command(author, version, about = "GasDepot storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Force-populate the baseline datasets
    Seed,
    /// Manage the product catalog
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Manage accounts
    Profiles {
        #[command(subcommand)]
        action: commands::profiles::ProfileAction,
    },
    /// Place, inspect, and advance orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Check credentials and print a session token
    Login {
        /// Login email
        #[arg(short, long)]
        email: String,

        /// Account secret
        #[arg(short, long)]
        secret: String,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run()?,
        Commands::Catalog { action } => commands::catalog::run(action)?,
        Commands::Profiles { action } => commands::profiles::run(action)?,
        Commands::Orders { action } => commands::orders::run(action)?,
        Commands::Login { email, secret } => commands::login::run(&email, &secret)?,
    }
    Ok(())
}
