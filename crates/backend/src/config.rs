//! Backend configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GASDEPOT_DATA_DIR` - Directory for persisted collections (default: `./data`)
//! - `GASDEPOT_TOKEN_SECRET` - Token signing secret (min 16 chars, no
//!   placeholder patterns); falls back to a built-in development secret
//!   with a warning, which is acceptable only because the whole backend
//!   is a local simulation
//! - `GASDEPOT_POLL_INTERVAL_SECS` - Order poll interval (default: 5)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tracing::warn;

const MIN_SECRET_LENGTH: usize = 16;

/// Built-in development signing secret, standing in for a key a real
/// backend would hold server-side.
const DEV_TOKEN_SECRET: &str = "gasdepot-dev-signing-secret-0001";

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-", "changeme", "replace", "placeholder", "example", "password", "xxx", "todo", "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Backend configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    /// Token signing secret.
    pub token_secret: SecretString,
    /// Order poll interval for watcher-backed views.
    pub poll_interval: Duration,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for unparsable values or a secret that is
    /// too short or looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("GASDEPOT_DATA_DIR")
            .map_or_else(|_| PathBuf::from("./data"), PathBuf::from);

        let token_secret = match std::env::var("GASDEPOT_TOKEN_SECRET") {
            Ok(secret) => {
                validate_secret("GASDEPOT_TOKEN_SECRET", &secret)?;
                SecretString::from(secret)
            }
            Err(_) => {
                warn!("GASDEPOT_TOKEN_SECRET not set, using the built-in development secret");
                SecretString::from(DEV_TOKEN_SECRET.to_owned())
            }
        };

        let poll_interval = match std::env::var("GASDEPOT_POLL_INTERVAL_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "GASDEPOT_POLL_INTERVAL_SECS".to_owned(),
                        format!("not a number of seconds: {raw}"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => crate::watch::DEFAULT_POLL_INTERVAL,
        };

        Ok(Self {
            data_dir,
            token_secret,
            poll_interval,
        })
    }
}

fn validate_secret(var: &str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var.to_owned(),
            format!("must be at least {MIN_SECRET_LENGTH} characters"),
        ));
    }

    let lowered = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lowered.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var.to_owned(),
                format!("looks like a placeholder (contains {pattern:?})"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_rejected() {
        let err = validate_secret("X", "short").expect_err("too short");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn placeholder_secrets_are_rejected() {
        let err = validate_secret("X", "changeme-changeme-changeme").expect_err("placeholder");
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn strong_secrets_pass() {
        assert!(validate_secret("X", "fa9c1b4aa8d0e2c5f917").is_ok());
    }
}
