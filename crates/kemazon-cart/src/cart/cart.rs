//! The in-memory cart collection.

use crate::cart::{CartLine, ProductSnapshot};
use crate::ids::{ProductId, SellerId};
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// An ordered collection of line items, at most one per product.
///
/// This type knows nothing about persistence; [`CartStore`](crate::CartStore)
/// layers write-through storage and events on top of it.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from lines, merging duplicates into the first occurrence.
    ///
    /// A later duplicate contributes its quantity only; the first line's
    /// snapshot is kept.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            match cart.line_mut(&line.product_id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| &l.product_id == product_id)
    }

    /// Add one unit of a product.
    ///
    /// An existing line gets its quantity incremented and keeps its original
    /// snapshot; `snapshot` is discarded. Returns the resulting line.
    pub fn add(&mut self, snapshot: ProductSnapshot) -> &CartLine {
        let index = match self.lines.iter().position(|l| l.product_id == snapshot.product_id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(1);
                index
            }
            None => {
                self.lines.push(CartLine::from_snapshot(snapshot));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Remove the line for a product, returning it if it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| &l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Set a line's quantity exactly.
    ///
    /// Quantities below 1 are rejected and leave the cart untouched; values
    /// above `u32::MAX` are clamped. Returns the new quantity if a line was
    /// updated.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Option<u32> {
        if quantity < 1 {
            return None;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let line = self.line_mut(product_id)?;
        line.quantity = quantity;
        Some(quantity)
    }

    /// Remove every line, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Distinct sellers in the cart. Lines without a seller count as `None`.
    pub fn sellers(&self) -> HashSet<Option<&SellerId>> {
        self.lines.iter().map(|l| l.seller_id.as_ref()).collect()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLine>::deserialize(deserializer).map(Cart::from_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {}", id), Money::from_major(price))
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_add_new_product() {
        let mut cart = Cart::new();
        let line = cart.add(product("1", 100));
        assert_eq!(line.quantity, 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_product_keeps_first_snapshot() {
        let mut cart = Cart::new();
        cart.add(product("1", 100));
        let line = cart.add(ProductSnapshot::new("1", "Renamed", Money::from_major(999)));

        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, Money::from_major(100));
        assert_eq!(line.name, "Product 1");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_preserves_order() {
        let mut cart = Cart::new();
        cart.add(product("b", 1));
        cart.add(product("a", 1));
        cart.add(product("b", 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn test_remove() {
        let mut cart = Cart::new();
        cart.add(product("1", 10));
        cart.add(product("2", 20));

        let removed = cart.remove(&ProductId::new("1")).unwrap();
        assert_eq!(removed.product_id.as_str(), "1");
        assert!(cart.remove(&ProductId::new("1")).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = Cart::new();
        cart.add(product("1", 10));
        let id = ProductId::new("1");

        assert_eq!(cart.set_quantity(&id, 5), Some(5));
        assert_eq!(cart.set_quantity(&id, 0), None);
        assert_eq!(cart.set_quantity(&id, -1), None);
        assert_eq!(cart.get(&id).unwrap().quantity, 5);
        assert_eq!(cart.set_quantity(&ProductId::new("missing"), 3), None);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = Cart::new();
        cart.add(product("1", 10));
        assert_eq!(
            cart.set_quantity(&ProductId::new("1"), i64::MAX),
            Some(u32::MAX)
        );
    }

    #[test]
    fn test_derived_values() {
        let mut cart = Cart::new();
        cart.add(product("1", 50));
        cart.add(product("1", 50));
        cart.add(product("2", 30));

        assert_eq!(cart.total(), Money::from_major(130));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(product("1", 50));
        cart.add(product("2", 50));
        assert_eq!(cart.clear(), 2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_from_lines_merges_duplicates() {
        let mut first = CartLine::from_snapshot(product("1", 10));
        first.quantity = 2;
        let mut dup = CartLine::from_snapshot(ProductSnapshot::new("1", "Other", Money::from_major(99)));
        dup.quantity = 3;
        let other = CartLine::from_snapshot(product("2", 5));

        let cart = Cart::from_lines([first, other, dup]);

        assert_eq!(cart.len(), 2);
        let merged = cart.get(&ProductId::new("1")).unwrap();
        assert_eq!(merged.quantity, 5);
        assert_eq!(merged.price, Money::from_major(10));
    }

    #[test]
    fn test_sellers() {
        let mut cart = Cart::new();
        cart.add(product("1", 1).with_seller("s1"));
        cart.add(product("2", 1).with_seller("s1"));
        assert_eq!(cart.sellers().len(), 1);

        cart.add(product("3", 1));
        assert_eq!(cart.sellers().len(), 2);
    }
}
