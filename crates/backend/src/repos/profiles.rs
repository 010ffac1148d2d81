//! Profile repository.
//!
//! Accounts keyed by RUT. Phone numbers are validated here on create and
//! on update-when-supplied, so malformed input fails before any write.
//! Credential checks live here too; the session service is the only
//! intended caller of [`ProfileRepository::validate_credentials`].

use std::sync::Arc;

use tracing::{debug, instrument};

use gasdepot_core::{Address, Email, Phone, Role, Rut, UserProfile};

use crate::seed;
use crate::storage::StorageBackend;
use crate::store::{Record, RecordStore, RepositoryError};

impl Record for UserProfile {
    const COLLECTION: &'static str = "gasdepot_profiles";

    fn key(&self) -> &str {
        self.rut.as_str()
    }
}

/// Draft for a new account; the phone arrives raw and is validated here.
#[derive(Debug, Clone)]
pub struct NewProfile {
    /// National identity number; the unique key.
    pub rut: Rut,
    /// Display name.
    pub name: String,
    /// Actor role.
    pub role: Role,
    /// Plaintext credential.
    pub secret: String,
    /// Login email.
    pub email: Email,
    /// Raw phone input, validated on create.
    pub phone: String,
    /// Saved delivery addresses, if any.
    pub addresses: Option<Vec<Address>>,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New role (admin edits only; the repository does not gate this).
    pub role: Option<Role>,
    /// New secret.
    pub secret: Option<String>,
    /// New login email.
    pub email: Option<Email>,
    /// New raw phone input, validated on update.
    pub phone: Option<String>,
    /// Replacement address list.
    pub addresses: Option<Vec<Address>>,
}

/// Errors from the change-secret flow.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The supplied current secret does not match the stored one.
    #[error("current secret does not match")]
    WrongSecret,
    /// No profile exists under the given RUT.
    #[error("no profile with rut {0}")]
    UnknownProfile(String),
    /// The underlying store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Account repository keyed by RUT.
#[derive(Clone)]
pub struct ProfileRepository {
    store: RecordStore<UserProfile>,
}

impl ProfileRepository {
    /// Repository over the given backend, seeded with the baseline
    /// accounts.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: RecordStore::new(backend, seed::baseline_profiles()),
        }
    }

    /// All profiles in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_all(&self) -> Result<Vec<UserProfile>, RepositoryError> {
        self.store.get_all()
    }

    /// The profile with the given RUT, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_by_rut(&self, rut: &Rut) -> Result<Option<UserProfile>, RepositoryError> {
        self.store.get(rut.as_str())
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPhone`] for a malformed phone and
    /// [`RepositoryError::DuplicateKey`] when the RUT is taken; nothing is
    /// written in either case.
    #[instrument(skip(self, new), fields(rut = %new.rut))]
    pub fn create(&self, new: NewProfile) -> Result<UserProfile, RepositoryError> {
        let phone = Phone::parse(&new.phone)?;
        let profile = UserProfile {
            rut: new.rut,
            name: new.name,
            role: new.role,
            secret: new.secret,
            email: new.email,
            phone,
            addresses: new.addresses,
        };

        self.store.create(profile.clone())?;
        debug!("profile created");
        Ok(profile)
    }

    /// Merge a partial update into the profile with the given RUT.
    ///
    /// Returns the updated profile, or `None` (writing nothing) when no
    /// profile matches.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::InvalidPhone`] for a malformed phone;
    /// validation runs before any write.
    pub fn update(
        &self,
        rut: &Rut,
        patch: ProfilePatch,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        let phone = patch.phone.as_deref().map(Phone::parse).transpose()?;

        self.store.update(rut.as_str(), |profile| {
            if let Some(name) = patch.name {
                profile.name = name;
            }
            if let Some(role) = patch.role {
                profile.role = role;
            }
            if let Some(secret) = patch.secret {
                profile.secret = secret;
            }
            if let Some(email) = patch.email {
                profile.email = email;
            }
            if let Some(phone) = phone {
                profile.phone = phone;
            }
            if let Some(addresses) = patch.addresses {
                profile.addresses = Some(addresses);
            }
        })
    }

    /// Remove the profile with the given RUT. Idempotent; admin-only by
    /// convention, not enforced here.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn delete(&self, rut: &Rut) -> Result<(), RepositoryError> {
        self.store.delete(rut.as_str())
    }

    /// Look up a profile by credentials: case-insensitive email, exact
    /// secret. `None` means the pair matches no account.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn validate_credentials(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<Option<UserProfile>, RepositoryError> {
        Ok(self
            .get_all()?
            .into_iter()
            .find(|p| p.email.matches(email) && p.secret == secret))
    }

    /// Change an account's secret after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::UnknownProfile`] for a missing account
    /// and [`CredentialError::WrongSecret`] when `current` does not match.
    pub fn update_secret(
        &self,
        rut: &Rut,
        current: &str,
        new_secret: &str,
    ) -> Result<(), CredentialError> {
        let profile = self
            .get_by_rut(rut)?
            .ok_or_else(|| CredentialError::UnknownProfile(rut.to_string()))?;

        if profile.secret != current {
            return Err(CredentialError::WrongSecret);
        }

        self.update(
            rut,
            ProfilePatch {
                secret: Some(new_secret.to_owned()),
                ..ProfilePatch::default()
            },
        )?;
        Ok(())
    }
}
