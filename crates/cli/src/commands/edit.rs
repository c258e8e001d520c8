//! `mp-cart add | increment | decrement` - apply one mutation.

use marketplace_cart::Mutation;
use tracing::info;

use crate::config::CliConfig;

use super::show;

/// Apply `mutation` to the stored cart and print the result.
///
/// Waits for the write to be attempted before returning, so the process can
/// exit right after. Storage failures are logged by the cart, not returned.
pub async fn run(config: &CliConfig, mutation: Mutation) {
    let store = super::open_store(config).await;

    let kind = mutation.kind();
    let product_id = mutation.product_id().clone();
    let items = store.apply(mutation);
    store.flush().await;

    info!(mutation = kind, product_id = %product_id, items = items.len(), "Cart updated");
    super::print(&show::render(&items));
}
