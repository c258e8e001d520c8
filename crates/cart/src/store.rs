//! The cart store.
//!
//! [`CartStore`] owns the canonical [`CartCollection`]. Mutations are applied
//! synchronously under a lock, and the post-mutation snapshot is queued for
//! write-back in the same critical section, so writes reach the writer lane
//! in exactly the order the mutations were applied.
//!
//! # Lifecycle
//!
//! `Uninitialized → Hydrating → Ready`. [`CartStore::open`] starts hydration
//! on a background task and returns at once. Mutations issued while
//! hydrating are visible immediately, recorded in a pending log, and replayed
//! on top of the hydrated collection when it is installed. Nothing is written
//! until the store is ready, so the read cannot observe a half-applied write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use marketplace_core::{CartCollection, NewLineItem, ProductId};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::mutation::Mutation;
use crate::storage::KeyValueStore;
use crate::sync::{self, PersistenceSync};

/// Key the cart record is stored under.
///
/// Stable across versions so existing stored carts keep loading.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Store construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// Durable storage key for the cart record.
    pub storage_key: String,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Hydration progress of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Constructed, storage not yet read.
    #[default]
    Uninitialized,
    /// The stored record is being read.
    Hydrating,
    /// The initial collection is installed. Final.
    Ready,
}

/// Snapshot published to readers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartState {
    /// Hydration progress.
    pub phase: Phase,
    /// Current collection.
    pub items: CartCollection,
}

/// Client-resident cart with durable write-back.
///
/// Cheaply cloneable via `Arc`; all clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    core: Mutex<StoreCore>,
    state: watch::Sender<CartState>,
    sync: PersistenceSync,
}

#[derive(Default)]
struct StoreCore {
    phase: Phase,
    items: CartCollection,
    pending: Vec<Mutation>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.core();
        f.debug_struct("CartStore")
            .field("phase", &core.phase)
            .field("items", &core.items.len())
            .field("pending", &core.pending.len())
            .finish()
    }
}

impl CartStore {
    /// Open a cart backed by `storage` and start hydrating it.
    ///
    /// Returns immediately in [`Phase::Hydrating`]. Await [`ready`](Self::ready)
    /// before the first read if the stored cart must be visible.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn open<S: KeyValueStore>(storage: S, options: CartOptions) -> Self {
        let storage = Arc::new(storage);
        let key: Arc<str> = Arc::from(options.storage_key);

        let sync = PersistenceSync::spawn(Arc::clone(&storage), Arc::clone(&key));
        let (state, _) = watch::channel(CartState::default());
        let store = Self {
            inner: Arc::new(CartStoreInner {
                core: Mutex::new(StoreCore::default()),
                state,
                sync,
            }),
        };

        store.begin_hydration();
        let hydrating = store.clone();
        tokio::spawn(async move {
            let hydrated = sync::hydrate(storage.as_ref(), &key).await;
            hydrating.install(hydrated);
        });

        store
    }

    /// Open a cart and wait until it is hydrated.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub async fn open_ready<S: KeyValueStore>(storage: S, options: CartOptions) -> Self {
        let store = Self::open(storage, options);
        store.ready().await;
        store
    }

    /// Add one unit of a product.
    ///
    /// An existing item keeps its stored title, image and price; only its
    /// quantity goes up. A new product is appended with quantity 1.
    /// Returns the updated collection.
    pub fn add_to_cart(&self, item: NewLineItem) -> CartCollection {
        self.apply(Mutation::Add(item))
    }

    /// Add one unit of a product already in the cart. Absent IDs are ignored.
    pub fn increment(&self, id: impl Into<ProductId>) -> CartCollection {
        self.apply(Mutation::Increment(id.into()))
    }

    /// Remove one unit of a product, dropping it from the cart at zero.
    /// Absent IDs are ignored.
    pub fn decrement(&self, id: impl Into<ProductId>) -> CartCollection {
        self.apply(Mutation::Decrement(id.into()))
    }

    /// Current collection.
    #[must_use]
    pub fn items(&self) -> CartCollection {
        self.core().items.clone()
    }

    /// Current hydration phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.core().phase
    }

    /// Watch the cart for changes.
    ///
    /// The receiver sees every published [`CartState`]; it cannot mutate
    /// the cart.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.state.subscribe()
    }

    /// Wait until the stored cart has been installed.
    pub async fn ready(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self.inner`, so the channel cannot close here.
        let _ = rx.wait_for(|state| state.phase == Phase::Ready).await;
    }

    /// Wait for hydration, then for every write queued so far to be attempted.
    pub async fn flush(&self) {
        self.ready().await;
        self.inner.sync.flush().await;
    }

    /// Apply a mutation and queue the write of its result.
    pub fn apply(&self, mutation: Mutation) -> CartCollection {
        let mut core = self.core();
        let changed = mutation.apply(&mut core.items);
        let snapshot = core.items.clone();

        debug!(
            mutation = mutation.kind(),
            product_id = %mutation.product_id(),
            changed,
            phase = ?core.phase,
            "Applied cart mutation"
        );

        if core.phase == Phase::Ready {
            self.inner.sync.persist(snapshot.clone());
        } else {
            core.pending.push(mutation);
        }

        self.publish(&core);
        snapshot
    }

    fn begin_hydration(&self) {
        let mut core = self.core();
        if core.phase == Phase::Uninitialized {
            core.phase = Phase::Hydrating;
            self.publish(&core);
        }
    }

    /// Install the hydrated collection and replay anything issued meanwhile.
    fn install(&self, hydrated: CartCollection) {
        let mut core = self.core();
        if core.phase == Phase::Ready {
            return;
        }

        let pending = std::mem::take(&mut core.pending);
        let mut items = hydrated;
        for mutation in &pending {
            mutation.apply(&mut items);
        }

        core.items = items;
        core.phase = Phase::Ready;
        if !pending.is_empty() {
            self.inner.sync.persist(core.items.clone());
        }

        info!(
            items = core.items.len(),
            replayed = pending.len(),
            "Cart ready"
        );
        self.publish(&core);
    }

    fn publish(&self, core: &StoreCore) {
        self.inner.state.send_replace(CartState {
            phase: core.phase,
            items: core.items.clone(),
        });
    }

    fn core(&self) -> MutexGuard<'_, StoreCore> {
        self.inner
            .core
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::Price;
    use rust_decimal::Decimal;

    use super::*;
    use crate::codec;
    use crate::storage::MemoryStore;

    fn shirt() -> NewLineItem {
        NewLineItem::new("p1", "Shirt", "u", Price::new(Decimal::new(50, 0)).unwrap())
    }

    fn stored(storage: &MemoryStore) -> CartCollection {
        codec::decode(&storage.value(DEFAULT_STORAGE_KEY).unwrap()).unwrap()
    }

    fn quantity(items: &CartCollection, id: &str) -> Option<u32> {
        items.get(&ProductId::new(id)).map(|item| item.quantity.get())
    }

    #[tokio::test]
    async fn test_add_to_empty_cart() {
        let store = CartStore::open_ready(MemoryStore::new(), CartOptions::default()).await;

        let items = store.add_to_cart(shirt());

        assert_eq!(items.len(), 1);
        let item = items.get(&ProductId::new("p1")).unwrap();
        assert_eq!(item.title, "Shirt");
        assert_eq!(item.image_url, "u");
        assert_eq!(item.price.amount(), Decimal::new(50, 0));
        assert_eq!(item.quantity.get(), 1);
        assert_eq!(store.items(), items);
    }

    #[tokio::test]
    async fn test_increment_decrement_to_removal() {
        let store = CartStore::open_ready(MemoryStore::new(), CartOptions::default()).await;
        store.add_to_cart(shirt());

        assert_eq!(quantity(&store.increment("p1"), "p1"), Some(2));
        assert_eq!(quantity(&store.decrement("p1"), "p1"), Some(1));
        assert!(store.decrement("p1").is_empty());
    }

    #[tokio::test]
    async fn test_persists_post_mutation_snapshot() {
        let storage = MemoryStore::new();
        let store = CartStore::open_ready(storage.clone(), CartOptions::default()).await;

        store.add_to_cart(shirt());
        let after_increment = store.increment("p1");
        store.flush().await;

        assert_eq!(stored(&storage), after_increment);
        assert_eq!(quantity(&stored(&storage), "p1"), Some(2));
    }

    #[tokio::test]
    async fn test_noop_mutation_still_writes() {
        let storage = MemoryStore::new();
        let store = CartStore::open_ready(storage.clone(), CartOptions::default()).await;

        store.increment("missing");
        store.flush().await;

        assert_eq!(storage.write_count(), 1);
        assert!(stored(&storage).is_empty());
    }

    #[tokio::test]
    async fn test_hydrates_stored_cart() {
        let record = r#"[{"id":"p1","title":"Shirt","imageUrl":"u","price":50,"quantity":3}]"#;
        let storage = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, record);

        let store = CartStore::open_ready(storage, CartOptions::default()).await;

        assert_eq!(store.phase(), Phase::Ready);
        assert_eq!(quantity(&store.items(), "p1"), Some(3));
    }

    #[tokio::test]
    async fn test_corrupt_record_hydrates_empty() {
        let storage = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "[{broken");

        let store = CartStore::open_ready(storage, CartOptions::default()).await;

        assert_eq!(store.phase(), Phase::Ready);
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let storage = MemoryStore::new();
        let options = CartOptions {
            storage_key: "@Other:cart".to_string(),
        };
        let store = CartStore::open_ready(storage.clone(), options).await;

        store.add_to_cart(shirt());
        store.flush().await;

        assert!(storage.value(DEFAULT_STORAGE_KEY).is_none());
        assert!(storage.value("@Other:cart").is_some());
    }

    #[tokio::test]
    async fn test_write_failure_does_not_affect_state() {
        let storage = MemoryStore::new();
        let store = CartStore::open_ready(storage.clone(), CartOptions::default()).await;

        storage.fail_writes(true);
        let items = store.add_to_cart(shirt());
        store.flush().await;
        assert_eq!(store.items(), items);
        assert!(storage.value(DEFAULT_STORAGE_KEY).is_none());

        storage.fail_writes(false);
        store.increment("p1");
        store.flush().await;
        assert_eq!(quantity(&stored(&storage), "p1"), Some(2));
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let store = CartStore::open_ready(MemoryStore::new(), CartOptions::default()).await;
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.add_to_cart(shirt());

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.items.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_cart() {
        let store = CartStore::open_ready(MemoryStore::new(), CartOptions::default()).await;
        let other = store.clone();

        other.add_to_cart(shirt());

        assert_eq!(quantity(&store.items(), "p1"), Some(1));
    }
}
