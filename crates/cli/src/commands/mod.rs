//! CLI subcommands.
//!
//! Every command opens the file-backed cart, waits for it to hydrate, and
//! prints the resulting cart to stdout. Logs go to stderr.

pub mod edit;
pub mod show;

use marketplace_cart::{CartStore, FileStore};

use crate::config::CliConfig;

/// Open the configured cart and wait until it is hydrated.
pub async fn open_store(config: &CliConfig) -> CartStore {
    let storage = FileStore::new(&config.storage_dir);
    CartStore::open_ready(storage, config.cart_options()).await
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    println!("{output}");
}
