//! The cart store: a cart plus write-through persistence.

use kemazon_storage::StoragePort;

use crate::cart::{Cart, CartLine, ProductSnapshot};
use crate::codec;
use crate::event::CartEvent;
use crate::ids::ProductId;
use crate::money::Money;
use crate::CartError;

/// Storage key used when the caller has no preference.
pub const DEFAULT_STORAGE_KEY: &str = "kemazon_cart";

/// Single source of truth for the buyer's pending purchase.
///
/// The persisted payload is read once, in [`CartStore::initialize`], and
/// rewritten after every mutation. Mutations never fail: a write error is
/// logged and the in-memory cart stays authoritative until the next
/// successful write.
///
/// # Example
///
/// ```rust
/// use kemazon_cart::prelude::*;
/// use kemazon_storage::MemoryStore;
///
/// let mut store = CartStore::initialize(MemoryStore::new(), DEFAULT_STORAGE_KEY);
/// store.add_line(ProductSnapshot::new("1", "A", Money::from_major(100)));
///
/// assert_eq!(store.derived_count(), 1);
/// assert_eq!(store.derived_total(), Money::from_major(100));
/// ```
pub struct CartStore<S> {
    storage: S,
    key: String,
    cart: Cart,
}

impl<S: StoragePort> CartStore<S> {
    /// Hydrate a store from `storage`.
    ///
    /// A missing, unreadable or corrupt payload yields an empty cart. The
    /// failure is logged and never returned.
    pub fn initialize(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match Self::load(&storage, &key) {
            Ok(Some(cart)) => {
                tracing::debug!(key = %key, lines = cart.len(), "hydrated persisted cart");
                cart
            }
            Ok(None) => {
                tracing::debug!(key = %key, "no persisted cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "persisted cart unreadable, starting empty");
                Cart::new()
            }
        };
        Self { storage, key, cart }
    }

    fn load(storage: &S, key: &str) -> Result<Option<Cart>, CartError> {
        match storage.read(key)? {
            Some(bytes) => codec::decode(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the original snapshot is kept; the fields of `product` are ignored.
    pub fn add_line(&mut self, product: ProductSnapshot) -> CartEvent {
        let line = self.cart.add(product);
        let event = CartEvent::LineAdded {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
        };
        self.write_through();
        event
    }

    /// Remove a product's line. Removing an absent product is a no-op.
    pub fn remove_line(&mut self, product_id: &ProductId) -> CartEvent {
        let was_present = self.cart.remove(product_id).is_some();
        self.write_through();
        CartEvent::LineRemoved {
            product_id: product_id.clone(),
            was_present,
        }
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity below 1 is rejected without touching the cart or storage;
    /// removal is the only way to drop a line. Returns an event only when an
    /// existing line was updated.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> Option<CartEvent> {
        if quantity < 1 {
            tracing::debug!(product_id = %product_id, quantity, "rejected quantity below 1");
            return None;
        }
        let applied = self.cart.set_quantity(product_id, quantity);
        self.write_through();
        applied.map(|quantity| CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartEvent {
        let lines_removed = self.cart.clear();
        self.write_through();
        CartEvent::Cleared { lines_removed }
    }

    /// Sum of quantities. Recomputed on every call.
    pub fn derived_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of price times quantity. Recomputed on every call.
    pub fn derived_total(&self) -> Money {
        self.cart.total()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.cart.get(product_id)
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The key the cart is persisted under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Write the current cart to storage, reporting any failure.
    pub fn persist(&self) -> Result<(), CartError> {
        let bytes = codec::encode(&self.cart)?;
        self.storage.write(&self.key, &bytes)?;
        tracing::trace!(key = %self.key, bytes = bytes.len(), "persisted cart");
        Ok(())
    }

    fn write_through(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kemazon_storage::{MemoryStore, StorageError};

    const KEY: &str = "test_cart";

    fn product(id: &str, price: i64) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {}", id), Money::from_major(price))
    }

    fn persisted(storage: &MemoryStore) -> Cart {
        let bytes = storage.read(KEY).unwrap().expect("cart was persisted");
        codec::decode(&bytes).unwrap()
    }

    /// Storage whose writes always fail.
    struct ReadOnly;

    impl StoragePort for ReadOnly {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(None)
        }

        fn write(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Store("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Store("read-only".to_string()))
        }
    }

    /// Storage whose reads always fail.
    struct Unreachable;

    impl StoragePort for Unreachable {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Err(StorageError::Open("unreachable".to_string()))
        }

        fn write(&self, _key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_initialize_empty_storage() {
        let store = CartStore::initialize(MemoryStore::new(), KEY);
        assert!(store.is_empty());
        assert_eq!(store.storage_key(), KEY);
    }

    #[test]
    fn test_initialize_unreachable_storage() {
        let store = CartStore::initialize(Unreachable, KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_line_persists_and_reports() {
        let storage = MemoryStore::new();
        let mut store = CartStore::initialize(storage.clone(), KEY);

        let event = store.add_line(product("1", 100));

        assert_eq!(
            event,
            CartEvent::LineAdded {
                product_id: ProductId::new("1"),
                name: "Product 1".to_string(),
                quantity: 1,
            }
        );
        assert_eq!(persisted(&storage), *store.cart());
    }

    #[test]
    fn test_remove_absent_line_reports_not_present() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        store.add_line(product("1", 100));

        let event = store.remove_line(&ProductId::new("2"));

        assert_eq!(
            event,
            CartEvent::LineRemoved {
                product_id: ProductId::new("2"),
                was_present: false,
            }
        );
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn test_rejected_quantity_does_not_write() {
        let storage = MemoryStore::new();
        let mut store = CartStore::initialize(storage.clone(), KEY);

        assert!(store.set_quantity(&ProductId::new("1"), 0).is_none());
        assert!(storage.read(KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_quantity_event() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        store.add_line(product("1", 10));

        let event = store.set_quantity(&ProductId::new("1"), 4);

        assert_eq!(
            event,
            Some(CartEvent::QuantityChanged {
                product_id: ProductId::new("1"),
                quantity: 4,
            })
        );
        assert_eq!(store.derived_count(), 4);
        assert_eq!(store.derived_total(), Money::from_major(40));
    }

    #[test]
    fn test_write_failure_does_not_fail_mutation() {
        let mut store = CartStore::initialize(ReadOnly, KEY);

        store.add_line(product("1", 100));
        store.add_line(product("1", 100));

        assert_eq!(store.derived_count(), 2);
        assert!(matches!(store.persist(), Err(CartError::Storage(_))));
    }

    #[test]
    fn test_clear_reports_removed_lines() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        store.add_line(product("1", 1));
        store.add_line(product("2", 1));

        assert_eq!(store.clear(), CartEvent::Cleared { lines_removed: 2 });
        assert!(store.is_empty());
    }

    #[test]
    fn test_into_storage() {
        let mut store = CartStore::initialize(MemoryStore::new(), KEY);
        store.add_line(product("1", 1));
        let storage = store.into_storage();
        assert_eq!(persisted(&storage).len(), 1);
    }
}
