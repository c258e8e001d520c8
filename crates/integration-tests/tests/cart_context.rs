//! Integration tests for wiring the cart store into consumers.

use std::sync::Arc;

use marketplace_cart::{CartContext, CartError, CartOptions, CartStore, MemoryStore};
use marketplace_integration_tests::{quantity, shirt};

/// A consumer built before the store exists.
struct CartBadge {
    context: Arc<CartContext>,
}

impl CartBadge {
    fn label(&self) -> String {
        format!("{} in cart", self.context.cart().items().item_count())
    }
}

#[tokio::test]
async fn test_consumer_sees_provided_store() {
    let context = Arc::new(CartContext::new());
    let badge = CartBadge {
        context: Arc::clone(&context),
    };

    let store = CartStore::open_ready(MemoryStore::new(), CartOptions::default()).await;
    context.provide(store.clone()).unwrap();

    store.add_to_cart(shirt());
    context.cart().increment("p1");

    assert_eq!(badge.label(), "2 in cart");
    assert_eq!(quantity(&store.items(), "p1"), Some(2));
}

#[test]
#[should_panic(expected = "cart accessed outside of an initialized cart context")]
fn test_consumer_without_provider_fails_loudly() {
    let badge = CartBadge {
        context: Arc::new(CartContext::new()),
    };
    let _ = badge.label();
}

#[test]
fn test_try_cart_reports_missing_provider() {
    let context = CartContext::default();
    let err = context.try_cart().unwrap_err();
    assert!(matches!(err, CartError::NoProvider));
    assert_eq!(
        err.to_string(),
        "cart accessed outside of an initialized cart context"
    );
}
