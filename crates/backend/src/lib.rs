//! GasDepot Backend - emulated store backend.
//!
//! Everything a real deployment would put behind a server lives here as
//! in-process function calls over a persisted key-value store:
//!
//! - [`storage`] - Pluggable key-value backends (in-memory, file-per-collection)
//! - [`store`] - Generic record store with seed-on-empty and uniqueness
//! - [`repos`] - Profile, product, and order repositories
//! - [`lifecycle`] - The order status graph and role-gated transition rules
//! - [`session`] - Signed session tokens with fixed two-hour expiry
//! - [`cart`] - Ephemeral cart aggregation
//! - [`watch`] - Fixed-interval polling for cross-actor order visibility
//! - [`config`] - Environment-driven configuration
//!
//! All operations are synchronous; callers are expected to be a
//! single-threaded UI loop (or a CLI). Writes are whole-collection
//! read-modify-write, which is the accepted trade-off for this scope.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod lifecycle;
pub mod repos;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod watch;

use std::sync::Arc;

use crate::config::Config;
use crate::repos::orders::OrderRepository;
use crate::repos::products::ProductRepository;
use crate::repos::profiles::ProfileRepository;
use crate::storage::{FileBackend, MemoryBackend, StorageBackend, StorageError};

/// Handle bundling the three repositories over one storage backend.
#[derive(Clone)]
pub struct Backend {
    /// Account repository.
    pub profiles: ProfileRepository,
    /// Catalog repository.
    pub products: ProductRepository,
    /// Order repository.
    pub orders: OrderRepository,
}

impl Backend {
    /// Open the file-backed store under the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the data directory cannot be created.
    pub fn open(config: &Config) -> Result<Self, StorageError> {
        let backend = FileBackend::open(&config.data_dir)?;
        Ok(Self::with_backend(Arc::new(backend)))
    }

    /// Backend over a throwaway in-memory store. Used by tests and demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Backend over an injected storage implementation.
    #[must_use]
    pub fn with_backend(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            profiles: ProfileRepository::new(Arc::clone(&storage)),
            products: ProductRepository::new(Arc::clone(&storage)),
            orders: OrderRepository::new(storage),
        }
    }
}
