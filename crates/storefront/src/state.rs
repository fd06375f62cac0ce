//! Application state built once at startup.
//!
//! [`AppState`] is the explicit context object handed to every command: it
//! owns the configuration, both cart stores and the local catalog, all bound
//! to the same storage backend.

use mrseafarm_core::{CartScope, Email, Product, ProductId};

use crate::cart::CartStore;
use crate::catalog::ProductCatalog;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::storage::{FileStore, KeyValueStore};

/// Application state shared by all commands.
#[derive(Debug)]
pub struct AppState<S> {
    config: StorefrontConfig,
    storage: S,
    customer_cart: CartStore<S>,
    admin_cart: CartStore<S>,
    catalog: ProductCatalog,
}

impl AppState<FileStore> {
    /// Create state backed by files under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved catalog cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let storage = config.file_store();
        Self::open(config, storage)
    }
}

impl<S: KeyValueStore + Clone> AppState<S> {
    /// Create a new application state.
    ///
    /// Both carts hydrate from `storage`; the catalog is loaded from it too.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved catalog cannot be loaded.
    pub fn open(config: StorefrontConfig, storage: S) -> Result<Self> {
        let catalog = ProductCatalog::load(&storage)?;
        let customer_cart = CartStore::open(storage.clone(), CartScope::Customer);
        let admin_cart = CartStore::open(storage.clone(), CartScope::Admin);

        tracing::debug!(
            products = catalog.len(),
            customer_lines = customer_cart.item_count(),
            admin_lines = admin_cart.item_count(),
            "state opened"
        );

        Ok(Self {
            config,
            storage,
            customer_cart,
            admin_cart,
            catalog,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// The cart for `scope`.
    #[must_use]
    pub const fn cart(&self, scope: CartScope) -> &CartStore<S> {
        match scope {
            CartScope::Customer => &self.customer_cart,
            CartScope::Admin => &self.admin_cart,
        }
    }

    /// Mutable access to the cart for `scope`.
    ///
    /// The admin cart is only handed to the admin identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when `scope` is admin and `who` is not.
    pub fn cart_mut(
        &mut self,
        scope: CartScope,
        who: Option<&Email>,
    ) -> Result<&mut CartStore<S>> {
        match scope {
            CartScope::Customer => Ok(&mut self.customer_cart),
            CartScope::Admin => {
                self.require_admin(who)?;
                Ok(&mut self.admin_cart)
            }
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Mutable access to the catalog for admin edits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] unless `who` is the admin.
    pub fn catalog_mut(&mut self, who: Option<&Email>) -> Result<&mut ProductCatalog> {
        self.require_admin(who)?;
        Ok(&mut self.catalog)
    }

    /// Persist the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn save_catalog(&self) -> Result<()> {
        self.catalog.save(&self.storage)?;
        Ok(())
    }

    /// Look up a catalog product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown IDs.
    pub fn product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("product {id}")))
    }

    /// Check that `who` is the configured admin.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anyone else, including nobody.
    pub fn require_admin(&self, who: Option<&Email>) -> Result<()> {
        match who {
            Some(email) if self.config.is_admin(email) => Ok(()),
            Some(email) => {
                tracing::warn!(email = %email, "admin access denied");
                Err(AppError::Unauthorized(format!("{email} is not an admin")))
            }
            None => Err(AppError::Unauthorized(
                "admin access requires signing in".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use mrseafarm_core::ProductDraft;

    use super::*;
    use crate::storage::MemoryStore;

    fn config() -> StorefrontConfig {
        StorefrontConfig::from_lookup(|_| None).unwrap()
    }

    fn admin() -> Email {
        Email::parse("mrseafarm@gmail.com").unwrap()
    }

    fn visitor() -> Email {
        Email::parse("visitor@example.in").unwrap()
    }

    fn draft() -> ProductDraft {
        ProductDraft {
            title: "Fresh Milk".to_string(),
            price: "₹60".to_string(),
            description: "Morning milking".to_string(),
            category: "Milk".to_string(),
            image_url: Some("https://img.example.com/milk.jpg".to_string()),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn test_carts_are_independent() {
        let backend = MemoryStore::new();
        let mut state = AppState::open(config(), backend.clone()).unwrap();
        let product = state
            .catalog_mut(Some(&admin()))
            .unwrap()
            .create(&draft(), Utc::now())
            .unwrap();

        state
            .cart_mut(CartScope::Customer, None)
            .unwrap()
            .add(&product);
        assert_eq!(state.cart(CartScope::Customer).item_count(), 1);
        assert_eq!(state.cart(CartScope::Admin).item_count(), 0);
        assert!(backend.contains("websiteCart"));
        assert!(!backend.contains("adminCart"));
    }

    #[test]
    fn test_admin_cart_requires_admin() {
        let mut state = AppState::open(config(), MemoryStore::new()).unwrap();
        assert!(matches!(
            state.cart_mut(CartScope::Admin, None),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            state.cart_mut(CartScope::Admin, Some(&visitor())),
            Err(AppError::Unauthorized(_))
        ));
        assert!(state.cart_mut(CartScope::Admin, Some(&admin())).is_ok());
    }

    #[test]
    fn test_catalog_writes_require_admin() {
        let mut state = AppState::open(config(), MemoryStore::new()).unwrap();
        assert!(state.catalog_mut(Some(&visitor())).is_err());
        assert!(state.catalog_mut(Some(&admin())).is_ok());
    }

    #[test]
    fn test_saved_catalog_reloads() {
        let backend = MemoryStore::new();
        let id = {
            let mut state = AppState::open(config(), backend.clone()).unwrap();
            let id = state
                .catalog_mut(Some(&admin()))
                .unwrap()
                .create(&draft(), Utc::now())
                .unwrap()
                .id;
            state.save_catalog().unwrap();
            id
        };

        let state = AppState::open(config(), backend).unwrap();
        assert_eq!(state.product(&id).unwrap().title, "Fresh Milk");
        assert!(matches!(
            state.product(&ProductId::generate()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_malformed_catalog_fails_open() {
        let backend = MemoryStore::with_entry("products", "not json");
        assert!(matches!(
            AppState::open(config(), backend),
            Err(AppError::Catalog(_))
        ));
    }
}
