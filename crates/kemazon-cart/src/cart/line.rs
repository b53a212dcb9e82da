//! Line items and the product snapshots they are built from.

use crate::ids::{ProductId, SellerId};
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};

/// Product fields captured when the buyer adds it to the cart.
///
/// Deserializes from the catalog's product records, which carry the
/// identity as `id` and the seller as `userId`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default, alias = "userId", skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
}

impl ProductSnapshot {
    /// Create a snapshot with the required fields.
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            images: Vec::new(),
            seller_id: None,
        }
    }

    /// Append an image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    /// Set the seller.
    pub fn with_seller(mut self, seller_id: impl Into<SellerId>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }
}

/// One product the buyer intends to purchase.
///
/// `name`, `price`, `images` and `seller_id` are the snapshot taken when the
/// line was created. They are never refreshed from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "WireLine")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line with quantity 1 from a snapshot.
    pub fn from_snapshot(snapshot: ProductSnapshot) -> Self {
        Self {
            product_id: snapshot.product_id,
            name: snapshot.name,
            price: snapshot.price,
            images: snapshot.images,
            seller_id: snapshot.seller_id,
            quantity: 1,
        }
    }

    /// Price times quantity.
    pub fn subtotal(&self) -> Money {
        self.price.times(self.quantity)
    }

    /// First image reference, if any.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Line as read from storage.
///
/// Accepts the legacy field names and a missing, zero or negative quantity,
/// which all normalize to 1.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLine {
    #[serde(alias = "id")]
    product_id: ProductId,
    name: String,
    price: Money,
    #[serde(default, deserialize_with = "null_as_empty")]
    images: Vec<String>,
    #[serde(default, alias = "userId")]
    seller_id: Option<SellerId>,
    #[serde(default)]
    quantity: Option<i64>,
}

/// Catalog records store `images: null` for products without pictures.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<WireLine> for CartLine {
    fn from(wire: WireLine) -> Self {
        let quantity = match wire.quantity {
            Some(q) if q >= 1 => u32::try_from(q).unwrap_or(u32::MAX),
            _ => 1,
        };
        Self {
            product_id: wire.product_id,
            name: wire.name,
            price: wire.price,
            images: wire.images,
            seller_id: wire.seller_id,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_snapshot() {
        let snapshot = ProductSnapshot::new("1", "Mate", Money::from_major(100))
            .with_image("/uploads/mate.jpg")
            .with_seller("seller-1");
        let line = CartLine::from_snapshot(snapshot);

        assert_eq!(line.quantity, 1);
        assert_eq!(line.product_id, ProductId::new("1"));
        assert_eq!(line.cover_image(), Some("/uploads/mate.jpg"));
        assert_eq!(line.seller_id, Some(SellerId::new("seller-1")));
    }

    #[test]
    fn test_line_subtotal() {
        let mut line = CartLine::from_snapshot(ProductSnapshot::new("1", "A", Money::from_major(50)));
        line.quantity = 3;
        assert_eq!(line.subtotal(), Money::from_major(150));
    }

    #[test]
    fn test_line_serialized_shape() {
        let line = CartLine::from_snapshot(
            ProductSnapshot::new("1", "A", Money::from_major(100)).with_seller("9"),
        );
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "productId": "1",
                "name": "A",
                "price": 100,
                "images": [],
                "sellerId": "9",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_line_reads_legacy_product_record() {
        let line: CartLine = serde_json::from_str(
            r#"{"id": 5, "name": "Bici", "price": "250.50", "userId": 3,
                "description": "rodado 29", "stock": 2, "images": ["/a.png"]}"#,
        )
        .unwrap();

        assert_eq!(line.product_id.as_str(), "5");
        assert_eq!(line.seller_id, Some(SellerId::new("3")));
        assert_eq!(line.price, Money::new(25050));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_line_normalizes_quantity() {
        let zero: CartLine =
            serde_json::from_str(r#"{"productId": 1, "name": "A", "price": 1, "quantity": 0}"#)
                .unwrap();
        let negative: CartLine =
            serde_json::from_str(r#"{"productId": 1, "name": "A", "price": 1, "quantity": -4}"#)
                .unwrap();
        assert_eq!(zero.quantity, 1);
        assert_eq!(negative.quantity, 1);
    }

    #[test]
    fn test_snapshot_from_catalog_record() {
        let snapshot: ProductSnapshot =
            serde_json::from_str(r#"{"id": 8, "name": "Libro", "price": 30, "userId": "u1"}"#)
                .unwrap();
        assert_eq!(snapshot.product_id, ProductId::new("8"));
        assert_eq!(snapshot.seller_id, Some(SellerId::new("u1")));
        assert!(snapshot.images.is_empty());
    }
}
