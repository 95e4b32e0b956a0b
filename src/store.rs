//! Cart Store
//!
//! [`CartStore`] is the sole owner of the persisted cart. Every mutation
//! loads the cart, changes it and writes the whole cart back under a single
//! storage key. Reads never fail: a missing or unreadable value is an empty
//! cart.

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    cart::Cart,
    catalog::Catalog,
    products::ProductId,
    storage::{CartStorage, StorageError},
    summary::CartSummary,
};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "stamps_cart";

/// Errors raised while persisting the cart.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The cart could not be encoded.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The storage backend rejected the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Receives the cart's total quantity after every save, e.g. to refresh a badge counter.
pub trait CartObserver {
    /// Called after the cart has been persisted.
    fn on_cart_saved(&mut self, total_quantity: u32);
}

impl<F: FnMut(u32)> CartObserver for F {
    fn on_cart_saved(&mut self, total_quantity: u32) {
        self(total_quantity);
    }
}

/// No-op observer.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_cart_saved(&mut self, _: u32) {}
}

/// Cart Store
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    observers: Vec<Box<dyn CartObserver>>,
}

impl<S: CartStorage + fmt::Debug> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store persisting under [`DEFAULT_CART_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create a store persisting under `key`.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            observers: Vec::new(),
        }
    }

    /// Register an observer notified after every save.
    pub fn subscribe(&mut self, observer: impl CartObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Storage key the cart lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted cart.
    ///
    /// Absent, unreadable or malformed data yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "cart storage unreadable, using empty cart");
                return Cart::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key = %self.key, error = %err, "persisted cart malformed, using empty cart");
            Cart::new()
        })
    }

    /// Replace the persisted cart and notify observers.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be encoded or written.
    pub fn save(&mut self, cart: &Cart) -> Result<(), CartStoreError> {
        let encoded = serde_json::to_string(cart)?;
        self.storage.write(&self.key, &encoded)?;

        let total_quantity = cart.total_quantity();
        trace!(key = %self.key, lines = cart.len(), total_quantity, "cart saved");

        for observer in &mut self.observers {
            observer.on_cart_saved(total_quantity);
        }

        Ok(())
    }

    /// Add `quantity` units of a product.
    ///
    /// Unknown products and zero quantities are ignored without touching
    /// storage. Otherwise the product's line is incremented, or a new line
    /// snapshotting the catalog name and price is appended, and the cart is saved.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the updated cart cannot be saved.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        id: ProductId,
        quantity: u32,
    ) -> Result<(), CartStoreError> {
        let Some(product) = catalog.get(id) else {
            debug!(%id, "ignoring add of unlisted product");
            return Ok(());
        };

        if quantity == 0 {
            return Ok(());
        }

        let mut cart = self.load();
        cart.add(product, quantity);

        debug!(%id, quantity, in_cart = cart.quantity_of(id), "added to cart");

        self.save(&cart)
    }

    /// Remove a product's line, if present. The cart is saved either way.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be saved.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartStoreError> {
        let mut cart = self.load();

        if cart.remove(id).is_some() {
            debug!(%id, "removed from cart");
        }

        self.save(&cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`CartStoreError`] if the cart cannot be saved.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        debug!(key = %self.key, "clearing cart");

        self.save(&Cart::new())
    }

    /// Quantity of a product currently in the persisted cart, or 0.
    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.load().quantity_of(id)
    }

    /// Total quantity across the persisted cart.
    pub fn total_quantity(&self) -> u32 {
        self.load().total_quantity()
    }

    /// Summary of the persisted cart against `catalog`.
    pub fn summary(&self, catalog: &Catalog) -> CartSummary {
        CartSummary::build(&self.load(), catalog)
    }
}
