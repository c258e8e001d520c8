//! Persistence synchronization between the store and durable storage.
//!
//! Two directions:
//! - [`hydrate`] reads the record once at startup.
//! - [`persist`] writes a collection back. The store never calls it directly:
//!   it hands post-mutation snapshots to a [`PersistenceSync`] writer lane,
//!   which drains them in FIFO order on one background task.
//!
//! Every failure is contained here. Callers of cart mutations never see a
//! storage or codec error; they are logged and the in-memory state stays
//! authoritative.

use std::sync::Arc;

use marketplace_core::CartCollection;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::codec;
use crate::error::Result;
use crate::storage::KeyValueStore;

/// Read and decode the stored record.
///
/// Returns `Ok(None)` when no record exists.
///
/// # Errors
///
/// Returns [`CartError::Storage`](crate::CartError::Storage) if the read
/// fails and [`CartError::Decode`](crate::CartError::Decode) if the record is
/// corrupt.
pub async fn load<S: KeyValueStore + ?Sized>(
    storage: &S,
    key: &str,
) -> Result<Option<CartCollection>> {
    match storage.get(key).await? {
        Some(raw) => codec::decode(&raw).map(Some),
        None => Ok(None),
    }
}

/// Load the initial collection.
///
/// An absent record gives an empty cart. A corrupt record or a failed read
/// is logged and also gives an empty cart, so hydration never fails.
#[instrument(skip(storage))]
pub async fn hydrate<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> CartCollection {
    match load(storage, key).await {
        Ok(Some(collection)) => {
            info!(
                items = collection.len(),
                units = collection.item_count(),
                "Hydrated cart from storage"
            );
            collection
        }
        Ok(None) => {
            info!("No stored cart, starting empty");
            CartCollection::new()
        }
        Err(e) => {
            warn!(error = %e, "Discarding unreadable stored cart, starting empty");
            CartCollection::new()
        }
    }
}

/// Encode `collection` and write it under `key`, replacing the previous record.
///
/// # Errors
///
/// Returns [`CartError::Encode`](crate::CartError::Encode) or
/// [`CartError::Storage`](crate::CartError::Storage).
#[instrument(skip(storage, collection), fields(items = collection.len()))]
pub async fn persist<S: KeyValueStore + ?Sized>(
    storage: &S,
    key: &str,
    collection: &CartCollection,
) -> Result<()> {
    let encoded = codec::encode(collection)?;
    storage.set(key, encoded).await?;
    debug!("Persisted cart");
    Ok(())
}

enum WriteCommand {
    Persist(CartCollection),
    Flush(oneshot::Sender<()>),
}

/// Handle to the background writer lane.
///
/// Commands are processed strictly in the order they were sent. Each write is
/// attempted once; failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct PersistenceSync {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl PersistenceSync {
    /// Spawn the writer task for `key` on the current Tokio runtime.
    ///
    /// The task ends once every handle has been dropped and the queue is
    /// drained.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[must_use]
    pub fn spawn<S: KeyValueStore>(storage: Arc<S>, key: Arc<str>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<WriteCommand>();

        tokio::spawn(async move {
            debug!(key = %key, "Cart writer started");
            while let Some(command) = rx.recv().await {
                match command {
                    WriteCommand::Persist(collection) => {
                        if let Err(e) = persist(storage.as_ref(), &key, &collection).await {
                            warn!(key = %key, error = %e, "Failed to persist cart");
                        }
                    }
                    WriteCommand::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            debug!(key = %key, "Cart writer stopped");
        });

        Self { tx }
    }

    /// Queue a write of `collection`. Never blocks.
    pub fn persist(&self, collection: CartCollection) {
        if self.tx.send(WriteCommand::Persist(collection)).is_err() {
            warn!("Cart writer is gone, dropping write");
        }
    }

    /// Wait until every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done, rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done)).is_ok() {
            let _ = rx.await;
        }
    }
}
