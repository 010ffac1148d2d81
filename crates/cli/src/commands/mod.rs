//! CLI command implementations.

pub mod catalog;
pub mod login;
pub mod orders;
pub mod profiles;
pub mod seed;

use gasdepot_backend::Backend;
use gasdepot_backend::config::Config;
use gasdepot_backend::session::{Claims, Session, TokenService};

/// Open the file-backed store configured by the environment.
pub fn open_backend() -> Result<(Backend, Config), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    let backend = Backend::open(&config)?;
    Ok((backend, config))
}

/// Log in and return the verified claims; every role-gated command goes
/// through this.
pub fn authenticate(
    backend: &Backend,
    config: &Config,
    email: &str,
    secret: &str,
) -> Result<Claims, Box<dyn std::error::Error>> {
    let mut session = Session::new(TokenService::new(config.token_secret.clone()));
    session.login(&backend.profiles, email, secret)?;
    Ok(session.verified()?)
}
