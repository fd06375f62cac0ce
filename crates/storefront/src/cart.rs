//! Persistent cart store.
//!
//! [`CartStore`] owns one in-memory [`Cart`] and mirrors it into a
//! [`KeyValueStore`] under a fixed key. The stored value is read exactly once,
//! when the store is opened, and overwritten with the full cart after every
//! mutation.
//!
//! None of the operations fail. Unreadable or malformed stored state hydrates
//! as an empty cart; a failed write is logged and the in-memory cart stays
//! authoritative for the rest of the process.

use mrseafarm_core::{
    Cart, CartLineItem, CartScope, CartTotal, ClearPolicy, Product, ProductId,
};
use tracing::{debug, instrument, warn};

use crate::storage::KeyValueStore;

/// A cart bound to a storage backend and key.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
    clear_policy: ClearPolicy,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart for `scope`, hydrating from its storage key.
    pub fn open(storage: S, scope: CartScope) -> Self {
        Self::open_with_key(storage, scope.storage_key(), scope.clear_policy())
    }

    /// Open a cart under an arbitrary key.
    pub fn open_with_key(storage: S, key: impl Into<String>, clear_policy: ClearPolicy) -> Self {
        let key = key.into();
        let cart = hydrate(&storage, &key);
        debug!(key = %key, lines = cart.item_count(), "cart hydrated");
        Self {
            cart,
            storage,
            key,
            clear_policy,
        }
    }

    /// Add one unit of `product`, or a first line with its snapshot.
    #[instrument(skip(self, product), fields(key = %self.key, product_id = %product.id))]
    pub fn add(&mut self, product: &Product) {
        let quantity = self.cart.add(product);
        debug!(quantity, "added to cart");
        self.persist();
    }

    /// Remove the line for `id`, if any.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn remove(&mut self, id: &ProductId) {
        let removed = self.cart.remove(id);
        debug!(removed, "removed from cart");
        self.persist();
    }

    /// Set the quantity of an existing line; `<= 0` removes it.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) {
        let changed = self.cart.update_quantity(id, quantity);
        debug!(changed, "cart quantity updated");
        self.persist();
    }

    /// Empty the cart.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn clear(&mut self) {
        self.cart.clear();
        match self.clear_policy {
            ClearPolicy::PersistEmpty => self.persist(),
            ClearPolicy::RemoveRecord => {
                if let Err(e) = self.storage.remove(&self.key) {
                    warn!(error = %e, "failed to remove persisted cart");
                }
            }
        }
        debug!("cart cleared");
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Number of distinct lines (badge count).
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.cart.item_count()
    }

    #[must_use]
    pub fn total(&self) -> CartTotal {
        self.cart.total()
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.cart.summary()
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &json) {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

/// Read and parse the stored cart, degrading to empty on any problem.
fn hydrate<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    match storage.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "stored cart is malformed, starting empty");
            Cart::new()
        }),
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read stored cart, starting empty");
            Cart::new()
        }
    }
}
