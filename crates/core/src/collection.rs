//! The ordered cart collection and its quantity-reconciliation rules.
//!
//! Ordering is insertion order. Updating an item never moves it; only adding
//! a product that is not yet in the cart appends to the end.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::types::{LineItem, NewLineItem, ProductId};

/// Errors that can occur when building a [`CartCollection`] from raw items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// The same product appears more than once.
    #[error("duplicate line item for product {0}")]
    DuplicateItem(ProductId),
}

/// The full ordered set of line items in a cart.
///
/// Holds at most one [`LineItem`] per [`ProductId`]. Serializes as a plain
/// JSON array of items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct CartCollection {
    items: Vec<LineItem>,
}

impl CartCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the stored title, image and price are kept. Otherwise the product is
    /// appended with a quantity of one.
    pub fn add(&mut self, item: NewLineItem) {
        match self.position(&item.id) {
            Some(index) => {
                if let Some(existing) = self.items.get_mut(index) {
                    existing.increment();
                }
            }
            None => self.items.push(item.into_line_item()),
        }
    }

    /// Add one unit of a product that is already in the cart.
    ///
    /// Returns `false` and leaves the collection untouched if `id` is absent.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .map(LineItem::increment)
            .is_some()
    }

    /// Remove one unit of a product.
    ///
    /// The item leaves the cart when its last unit is removed. Returns
    /// `false` and leaves the collection untouched if `id` is absent.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };

        match item.decremented() {
            Some(quantity) => item.quantity = quantity,
            None => {
                self.items.remove(index);
            }
        }
        true
    }

    /// Look up an item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Items in cart order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over items in cart order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all items, saturating at `u64::MAX`.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(u64::from(item.quantity.get())))
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

impl TryFrom<Vec<LineItem>> for CartCollection {
    type Error = CollectionError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CollectionError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self { items })
    }
}

impl From<CartCollection> for Vec<LineItem> {
    fn from(collection: CartCollection) -> Self {
        collection.items
    }
}

impl<'a> IntoIterator for &'a CartCollection {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for CartCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}
