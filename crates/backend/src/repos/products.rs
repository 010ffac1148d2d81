//! Product repository.
//!
//! Plain CRUD over the catalog; no invariants beyond key uniqueness.
//! Whether a product may be purchased is derived by callers from
//! [`Product::purchasable`], not enforced here.

use std::sync::Arc;

use tracing::debug;

use gasdepot_core::Product;

use crate::seed;
use crate::storage::StorageBackend;
use crate::store::{Record, RecordStore, RepositoryError};

impl Record for Product {
    const COLLECTION: &'static str = "gasdepot_products";

    fn key(&self) -> &str {
        &self.id
    }
}

/// Partial product update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New display name.
    pub name: Option<String>,
    /// New price in pesos.
    pub price: Option<i64>,
    /// New description.
    pub description: Option<String>,
    /// New image reference.
    pub image: Option<String>,
    /// New stock count.
    pub stock: Option<u32>,
    /// New visibility flag.
    pub is_active: Option<bool>,
}

/// Catalog repository keyed by product id.
#[derive(Clone)]
pub struct ProductRepository {
    store: RecordStore<Product>,
}

impl ProductRepository {
    /// Repository over the given backend, seeded with the baseline
    /// catalog.
    #[must_use]
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            store: RecordStore::new(backend, seed::baseline_products()),
        }
    }

    /// All products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.store.get_all()
    }

    /// The product with the given id, if any.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn get_by_id(&self, id: &str) -> Result<Option<Product>, RepositoryError> {
        self.store.get(id)
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::DuplicateKey`] when the id is taken.
    pub fn create(&self, product: Product) -> Result<(), RepositoryError> {
        self.store.create(product)?;
        debug!("product created");
        Ok(())
    }

    /// Merge a partial update into the product with the given id.
    ///
    /// Returns the updated product, or `None` (writing nothing) when no
    /// product matches.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn update(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        self.store.update(id, |product| {
            if let Some(name) = patch.name {
                product.name = name;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(description) = patch.description {
                product.description = description;
            }
            if let Some(image) = patch.image {
                product.image = image;
            }
            if let Some(stock) = patch.stock {
                product.stock = Some(stock);
            }
            if let Some(is_active) = patch.is_active {
                product.is_active = Some(is_active);
            }
        })
    }

    /// Remove the product with the given id. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] on storage failure or corrupt data.
    pub fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        self.store.delete(id)
    }
}
