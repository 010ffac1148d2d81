//! Force-populate the baseline datasets.

use tracing::info;

use gasdepot_backend::seed;

use super::open_backend;

/// Re-seed profiles and products by touching every collection. Existing
/// data wins; seeding only fires where a collection is empty.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (backend, config) = open_backend()?;

    let profiles = backend.profiles.get_all()?;
    let products = backend.products.get_all()?;
    let orders = backend.orders.get_all()?;

    info!(dir = %config.data_dir.display(), "store ready");
    info!(
        "  {} profiles (baseline {})",
        profiles.len(),
        seed::baseline_profiles().len()
    );
    info!(
        "  {} products (baseline {})",
        products.len(),
        seed::baseline_products().len()
    );
    info!("  {} orders", orders.len());
    Ok(())
}
