//! Durable key-value storage contract.
//!
//! The cart treats its persistence medium as an opaque asynchronous get/set
//! store holding strings. Implementations decide where the bytes live; the
//! cart decides what is stored under which key.

mod file;
mod memory;

use std::future::Future;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

/// An asynchronous string key-value medium.
///
/// Methods take `&self`, so implementations use interior mutability where
/// they need it. Futures must be `Send` because hydration and write-back run
/// on spawned tasks.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever stored there.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}
