//! Textual encoding of the stored cart record.
//!
//! The record is a JSON array of objects with `id`, `title`, `imageUrl`,
//! `price` and `quantity`. Unknown fields are ignored on read.

use marketplace_core::CartCollection;

use crate::error::{CartError, Result};

/// Serialize a collection to its stored form.
///
/// # Errors
///
/// Returns [`CartError::Encode`] if serialization fails.
pub fn encode(collection: &CartCollection) -> Result<String> {
    serde_json::to_string(collection).map_err(CartError::Encode)
}

/// Parse a stored record back into a collection.
///
/// # Errors
///
/// Returns [`CartError::Decode`] if the text is not a JSON array of valid
/// line items or names the same product twice.
pub fn decode(raw: &str) -> Result<CartCollection> {
    serde_json::from_str(raw).map_err(CartError::Decode)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketplace_core::{NewLineItem, Price, ProductId};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_encode_uses_record_field_names() {
        let mut cart = CartCollection::new();
        cart.add(NewLineItem::new(
            "p1",
            "Shirt",
            "u",
            Price::new(Decimal::new(125, 1)).unwrap(),
        ));

        let encoded = encode(&cart).unwrap();
        assert_eq!(
            encoded,
            r#"[{"id":"p1","title":"Shirt","imageUrl":"u","price":12.5,"quantity":1}]"#
        );
    }

    #[test]
    fn test_decode_round_trip() {
        let mut cart = CartCollection::new();
        cart.add(NewLineItem::new("a", "A", "ua", Price::ZERO));
        cart.add(NewLineItem::new(
            "b",
            "B",
            "ub",
            Price::new(Decimal::new(725, 2)).unwrap(),
        ));
        cart.increment(&ProductId::new("b"));

        let decoded = decode(&encode(&cart).unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_decode_corrupt_record() {
        assert!(matches!(decode("{not json"), Err(CartError::Decode(_))));
        assert!(matches!(decode(r#"{"id":"p1"}"#), Err(CartError::Decode(_))));
        assert!(matches!(
            decode(r#"[{"id":"p1","title":"t","imageUrl":"u","price":-1,"quantity":1}]"#),
            Err(CartError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode("[]").unwrap().is_empty());
    }
}
