//! Events emitted by cart mutations.
//!
//! The store never presents anything itself. Each mutation returns an event
//! and the caller decides whether to show it as a toast, a log line or
//! nothing at all.

use crate::ids::ProductId;
use serde::Serialize;
use std::fmt;

/// Outcome of a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A product was added, or its existing line incremented.
    LineAdded {
        product_id: ProductId,
        name: String,
        quantity: u32,
    },
    /// A remove was requested. `was_present` is false when the product was
    /// not in the cart.
    LineRemoved {
        product_id: ProductId,
        was_present: bool,
    },
    /// A line's quantity was set.
    QuantityChanged { product_id: ProductId, quantity: u32 },
    /// The cart was emptied.
    Cleared { lines_removed: usize },
}

impl fmt::Display for CartEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartEvent::LineAdded { name, .. } => write!(f, "\"{}\" added to cart", name),
            CartEvent::LineRemoved { .. } => write!(f, "Product removed from cart"),
            CartEvent::QuantityChanged { quantity, .. } => {
                write!(f, "Quantity updated to {}", quantity)
            }
            CartEvent::Cleared { .. } => write!(f, "Cart emptied"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_messages() {
        let added = CartEvent::LineAdded {
            product_id: ProductId::new("1"),
            name: "Mate".to_string(),
            quantity: 1,
        };
        assert_eq!(added.to_string(), "\"Mate\" added to cart");
        assert_eq!(CartEvent::Cleared { lines_removed: 3 }.to_string(), "Cart emptied");
    }

    #[test]
    fn test_event_serialization() {
        let event = CartEvent::LineRemoved {
            product_id: ProductId::new("9"),
            was_present: false,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({"type": "line_removed", "product_id": "9", "was_present": false})
        );
    }
}
