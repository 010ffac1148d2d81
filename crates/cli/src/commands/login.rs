//! Credential check and token issuance.

use tracing::info;

use gasdepot_backend::session::{Session, TokenService};

use super::open_backend;

pub fn run(email: &str, secret: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (backend, config) = open_backend()?;

    let mut session = Session::new(TokenService::new(config.token_secret.clone()));
    let claims = session.login(&backend.profiles, email, secret)?;

    info!("logged in as {} ({})", claims.rut, claims.role);
    if let Some(token) = session.token() {
        info!("token: {token}");
    }
    Ok(())
}
