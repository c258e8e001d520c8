//! CLI error type.

use marketplace_cart::CartError;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The cart could not be rendered.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}
