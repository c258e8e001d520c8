//! Cart line items.
//!
//! A [`LineItem`] is one distinct product in the cart together with how many
//! units of it were added. [`NewLineItem`] is the same product data without a
//! quantity, which is what callers hand to `add_to_cart`.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// Product data for an item that is being added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

impl NewLineItem {
    /// Create product data for `add_to_cart`.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Turn the product data into a line item with a single unit.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity: NonZeroU32::MIN,
        }
    }
}

/// One product entry in the cart.
///
/// `quantity` is never zero: an item whose quantity would drop to zero is
/// removed from the collection instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Product image URL.
    #[serde(rename = "imageUrl", alias = "image_url")]
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Number of units in the cart.
    pub quantity: NonZeroU32,
}

impl LineItem {
    /// Add one unit, saturating at `u32::MAX`.
    pub const fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Remove one unit.
    ///
    /// Returns `None` if this was the last unit, meaning the item has to
    /// leave the cart.
    #[must_use]
    pub const fn decremented(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.quantity.get() - 1)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn shirt() -> NewLineItem {
        NewLineItem::new("p1", "Shirt", "u", Price::new(Decimal::new(50, 0)).unwrap())
    }

    #[test]
    fn test_into_line_item_has_one_unit() {
        let item = shirt().into_line_item();
        assert_eq!(item.quantity.get(), 1);
        assert_eq!(item.title, "Shirt");
    }

    #[test]
    fn test_increment_saturates() {
        let mut item = shirt().into_line_item();
        item.quantity = NonZeroU32::MAX;
        item.increment();
        assert_eq!(item.quantity, NonZeroU32::MAX);
    }

    #[test]
    fn test_decremented_last_unit() {
        let item = shirt().into_line_item();
        assert!(item.decremented().is_none());
    }

    #[test]
    fn test_serialized_field_names() {
        let item = shirt().into_line_item();
        let value = serde_json::to_value(&item).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["id", "imageUrl", "price", "quantity", "title"]);
    }

    #[test]
    fn test_deserialize_accepts_snake_case_image_url() {
        let json = r#"{"id":"p1","title":"Shirt","image_url":"u","price":50,"quantity":2}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.image_url, "u");
        assert_eq!(item.quantity.get(), 2);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"{"id":"p1","title":"Shirt","imageUrl":"u","price":50,"quantity":0}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }
}
