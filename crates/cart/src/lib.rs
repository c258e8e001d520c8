//! Marketplace Cart - client-resident cart state with durable persistence.
//!
//! The crate keeps the canonical cart in memory and mirrors it to an opaque
//! key-value medium so the cart survives restarts.
//!
//! # Architecture
//!
//! - [`CartStore`] owns the collection, applies mutations and is the only
//!   thing consumers read from.
//! - [`sync`] hydrates the store once at startup and writes the collection
//!   back after every mutation on a single FIFO writer lane.
//! - [`storage`] defines the [`KeyValueStore`] contract plus in-memory and
//!   file-backed media.
//! - [`CartContext`] is the explicit slot hosts use to hand a store to
//!   consumers that are built before it.
//!
//! # Example
//!
//! ```rust,no_run
//! use marketplace_cart::{CartOptions, CartStore, MemoryStore};
//! use marketplace_core::{NewLineItem, Price};
//!
//! # async fn demo() {
//! let store = CartStore::open(MemoryStore::new(), CartOptions::default());
//! store.ready().await;
//!
//! let items = store.add_to_cart(NewLineItem::new("p1", "Shirt", "u", Price::ZERO));
//! assert_eq!(items.len(), 1);
//!
//! store.flush().await;
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod context;
pub mod error;
pub mod mutation;
pub mod storage;
pub mod store;
pub mod sync;

pub use context::CartContext;
pub use error::{CartError, Result, StorageError};
pub use mutation::Mutation;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{CartOptions, CartState, CartStore, DEFAULT_STORAGE_KEY, Phase};
