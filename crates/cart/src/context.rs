//! Explicit cart wiring.
//!
//! Consumers that are built before the store exists hold a [`CartContext`]
//! and pull the store out of it when they need it. Reaching into an empty
//! context is a wiring defect, not a runtime condition.

use std::sync::OnceLock;

use crate::error::{CartError, Result};
use crate::store::CartStore;

/// Set-once slot holding the process's cart store.
#[derive(Debug, Default)]
pub struct CartContext {
    store: OnceLock<CartStore>,
}

impl CartContext {
    /// Create an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: OnceLock::new(),
        }
    }

    /// Create a context that already holds `store`.
    #[must_use]
    pub fn with_store(store: CartStore) -> Self {
        let context = Self::new();
        let _ = context.store.set(store);
        context
    }

    /// Wire `store` into the context.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::AlreadyProvided`] if a store was already wired in.
    pub fn provide(&self, store: CartStore) -> Result<()> {
        self.store
            .set(store)
            .map_err(|_| CartError::AlreadyProvided)
    }

    /// Whether a store has been wired in.
    #[must_use]
    pub fn is_provided(&self) -> bool {
        self.store.get().is_some()
    }

    /// The wired-in store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoProvider`] if nothing was provided.
    pub fn try_cart(&self) -> Result<&CartStore> {
        self.store.get().ok_or(CartError::NoProvider)
    }

    /// The wired-in store.
    ///
    /// # Panics
    ///
    /// Panics if nothing was provided. Use [`try_cart`](Self::try_cart) to
    /// check first.
    #[must_use]
    #[track_caller]
    pub fn cart(&self) -> &CartStore {
        match self.try_cart() {
            Ok(store) => store,
            Err(e) => panic!("{e}"),
        }
    }
}
