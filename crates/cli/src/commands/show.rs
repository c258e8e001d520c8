//! `mp-cart show` - print the stored cart.

use std::fmt::Write as _;

use marketplace_cart::codec;
use marketplace_core::CartCollection;

use crate::config::CliConfig;
use crate::error::CliError;

/// Print the cart, either as a table or as the raw stored JSON.
///
/// # Errors
///
/// Returns `CliError::Cart` if the JSON output cannot be encoded.
pub async fn run(config: &CliConfig, json: bool) -> Result<(), CliError> {
    let store = super::open_store(config).await;
    let items = store.items();

    let output = if json {
        codec::encode(&items)?
    } else {
        render(&items)
    };
    super::print(&output);
    Ok(())
}

/// Human-readable cart listing.
#[must_use]
pub fn render(items: &CartCollection) -> String {
    if items.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut output = format!(
        "Cart ({} products, {} units)",
        items.len(),
        items.item_count()
    );
    for item in items {
        let _ = write!(
            output,
            "\n  {:<12} {:<24} x{:<4} @ {}",
            item.id, item.title, item.quantity, item.price
        );
    }
    output
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{NewLineItem, Price};

    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&CartCollection::new()), "Cart is empty");
    }

    #[test]
    fn test_render_lists_items_in_order() {
        let mut items = CartCollection::new();
        items.add(NewLineItem::new("p2", "Hat", "h", "15".parse::<Price>().unwrap()));
        items.add(NewLineItem::new("p1", "Shirt", "u", "50".parse::<Price>().unwrap()));
        items.add(NewLineItem::new("p1", "Shirt", "u", "50".parse::<Price>().unwrap()));

        let output = render(&items);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines.first().copied(), Some("Cart (2 products, 3 units)"));
        assert!(lines.get(1).unwrap().contains("Hat"));
        assert!(lines.get(2).unwrap().contains("x2"));
        assert!(lines.get(2).unwrap().contains("@ 50.00"));
    }
}
