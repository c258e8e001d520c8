//! Cart mutations as values.
//!
//! A [`Mutation`] is applied to the live collection immediately. While the
//! store is still hydrating it is also kept in the pending log so it can be
//! replayed on top of the hydrated collection.

use marketplace_core::{CartCollection, NewLineItem, ProductId};

/// One consumer-issued change to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Add one unit of a product, appending it if new.
    Add(NewLineItem),
    /// Add one unit of a product already in the cart.
    Increment(ProductId),
    /// Remove one unit of a product, dropping it at zero.
    Decrement(ProductId),
}

impl Mutation {
    /// Apply the mutation to `collection`.
    ///
    /// Returns whether the collection changed.
    pub fn apply(&self, collection: &mut CartCollection) -> bool {
        match self {
            Self::Add(item) => {
                collection.add(item.clone());
                true
            }
            Self::Increment(id) => collection.increment(id),
            Self::Decrement(id) => collection.decrement(id),
        }
    }

    /// Product the mutation targets.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        match self {
            Self::Add(item) => &item.id,
            Self::Increment(id) | Self::Decrement(id) => id,
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add_to_cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
        }
    }
}
