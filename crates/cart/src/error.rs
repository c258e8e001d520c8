//! Error types for the cart store and its persistence.
//!
//! Storage and codec failures are recovered inside the crate and only logged;
//! they never reach the caller of a cart mutation. The one fatal error is
//! [`CartError::NoProvider`], raised when a consumer reaches for a cart that
//! was never wired in.

use thiserror::Error;

/// Failure reported by a [`KeyValueStore`](crate::KeyValueStore) medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The medium refused the operation (offline, quota, injected failure).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Cart-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// The stored record exists but is not a valid cart.
    #[error("Stored cart could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// The collection could not be serialized.
    #[error("Cart could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// Reading from or writing to durable storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A consumer accessed the cart outside of an initialized context.
    #[error("cart accessed outside of an initialized cart context")]
    NoProvider,

    /// A context was given a second store.
    #[error("cart context already has a store")]
    AlreadyProvided,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::NoProvider;
        assert_eq!(
            err.to_string(),
            "cart accessed outside of an initialized cart context"
        );

        let err = CartError::from(StorageError::Unavailable("quota exceeded".to_string()));
        assert_eq!(
            err.to_string(),
            "Storage error: Storage unavailable: quota exceeded"
        );
    }
}
