//! Integration tests for the marketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restarts, corrupt records and record compatibility
//! - `cart_hydration` - Mutations racing the startup read
//! - `cart_context` - Wiring the store into consumers
//!
//! This library holds the fixtures shared by those test binaries.

use std::sync::Arc;

use marketplace_cart::{KeyValueStore, MemoryStore, StorageError};
use marketplace_core::{CartCollection, NewLineItem, Price, ProductId};
use rust_decimal::Decimal;
use tokio::sync::Notify;

/// The shirt used throughout the cart scenarios.
#[must_use]
pub fn shirt() -> NewLineItem {
    product("p1", "Shirt", "u", 50)
}

/// Product data with a whole-number price.
///
/// # Panics
///
/// Panics if `price` is negative.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, title: &str, image_url: &str, price: i64) -> NewLineItem {
    NewLineItem::new(id, title, image_url, Price::new(Decimal::new(price, 0)).unwrap())
}

/// Quantity of `id` in `items`, if present.
#[must_use]
pub fn quantity(items: &CartCollection, id: &str) -> Option<u32> {
    items.get(&ProductId::new(id)).map(|item| item.quantity.get())
}

/// Stored record holding `p1` at the given quantity.
#[must_use]
pub fn shirt_record(quantity: u32) -> String {
    format!(r#"[{{"id":"p1","title":"Shirt","imageUrl":"u","price":50,"quantity":{quantity}}}]"#)
}

/// Memory store whose reads wait until [`GatedStore::release`] is called.
///
/// Writes go straight through, so tests can observe exactly when the cart
/// starts writing relative to hydration.
#[derive(Debug, Clone)]
pub struct GatedStore {
    store: MemoryStore,
    gate: Arc<Notify>,
}

impl GatedStore {
    /// Wrap `store`, holding back every read.
    #[must_use]
    pub fn new(store: MemoryStore) -> Self {
        Self {
            store,
            gate: Arc::new(Notify::new()),
        }
    }

    /// Let one pending (or the next) read through.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

impl KeyValueStore for GatedStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.gate.notified().await;
        self.store.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.store.set(key, value).await
    }
}
