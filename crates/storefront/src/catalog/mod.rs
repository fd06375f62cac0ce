//! Local product catalog.
//!
//! The live catalog belongs to the realtime database; this module keeps the
//! storefront's view of it. Changes arrive as [`CatalogEvent`]s (or a full
//! snapshot), admin edits go through [`ProductCatalog::create`],
//! [`ProductCatalog::update`] and [`ProductCatalog::delete`], and the whole
//! listing can be saved to and loaded from a [`KeyValueStore`].
//!
//! Carts never write here. They receive `Product` snapshots handed over by
//! the presentation layer.

mod query;

pub use query::{ProductQuery, ProductSort};

use chrono::{DateTime, Utc};
use mrseafarm_core::{Product, ProductDraft, ProductDraftError, ProductId};
use thiserror::Error;
use tracing::{debug, info};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the saved catalog.
pub const CATALOG_KEY: &str = "products";

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("invalid product: {0}")]
    Draft(#[from] ProductDraftError),

    #[error("catalog storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("catalog data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A change pushed by the catalog data source.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEvent {
    /// A product was created or changed.
    Upserted(Product),
    /// A product was deleted.
    Removed(ProductId),
}

/// Products keyed by ID, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Build a catalog from a full snapshot. Later duplicates replace earlier ones.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::new();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    /// Load the saved catalog, or an empty one if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the saved data does not parse.
    pub fn load<S: KeyValueStore>(storage: &S) -> Result<Self, CatalogError> {
        let Some(raw) = storage.get(CATALOG_KEY)? else {
            return Ok(Self::new());
        };
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        debug!(count = products.len(), "catalog loaded");
        Ok(Self::from_products(products))
    }

    /// Save the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save<S: KeyValueStore>(&self, storage: &S) -> Result<(), CatalogError> {
        let json = serde_json::to_string(&self.products)?;
        storage.set(CATALOG_KEY, &json)?;
        Ok(())
    }

    /// Apply one change from the live stream.
    pub fn apply(&mut self, event: CatalogEvent) {
        match event {
            CatalogEvent::Upserted(product) => self.upsert(product),
            CatalogEvent::Removed(id) => {
                self.products.retain(|p| p.id != id);
            }
        }
    }

    /// Replace everything with a fresh snapshot.
    pub fn replace_all(&mut self, products: impl IntoIterator<Item = Product>) {
        *self = Self::from_products(products);
    }

    /// Add a product from the admin form under a newly generated ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Draft`] if required fields are missing.
    pub fn create(
        &mut self,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<Product, CatalogError> {
        let product = Product::from_draft(ProductId::generate(), draft, now)?;
        info!(product_id = %product.id, title = %product.title, "product added");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Edit an existing product, keeping its creation time.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown IDs and
    /// [`CatalogError::Draft`] for invalid drafts.
    pub fn update(
        &mut self,
        id: &ProductId,
        draft: &ProductDraft,
        now: DateTime<Utc>,
    ) -> Result<&Product, CatalogError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        product.apply_draft(draft, now)?;
        info!(product_id = %id, "product updated");
        Ok(product)
    }

    /// Delete a product and return it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for unknown IDs.
    pub fn delete(&mut self, id: &ProductId) -> Result<Product, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let product = self.products.remove(index);
        info!(product_id = %id, "product deleted");
        Ok(product)
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct category labels, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .products
            .iter()
            .map(|p| p.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Products matching `query`, in its sort order.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        query.apply(&self.products)
    }

    fn upsert(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }
}
