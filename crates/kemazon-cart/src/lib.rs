//! Client-side shopping cart for the Kemazon marketplace.
//!
//! This crate provides the buyer's cart as an explicit store object:
//!
//! - **Cart**: line items keyed by product, one line per product
//! - **Store**: write-through persistence through a [`StoragePort`]
//! - **Events**: each mutation returns a [`CartEvent`] for the caller to present
//! - **Checkout**: payment request building and settlement
//!
//! # Example
//!
//! ```rust
//! use kemazon_cart::prelude::*;
//! use kemazon_storage::MemoryStore;
//!
//! let mut store = CartStore::initialize(MemoryStore::new(), DEFAULT_STORAGE_KEY);
//!
//! store.add_line(ProductSnapshot::new("1", "Mate", Money::from_major(100)));
//! store.add_line(ProductSnapshot::new("1", "Mate", Money::from_major(100)));
//!
//! assert_eq!(store.derived_count(), 2);
//! println!("Total: {}", store.derived_total().display(Currency::ARS));
//! ```
//!
//! [`StoragePort`]: kemazon_storage::StoragePort

pub mod codec;
pub mod error;
pub mod event;
pub mod ids;
pub mod money;
pub mod store;

pub mod cart;
pub mod checkout;

pub use cart::{Cart, CartLine, ProductSnapshot};
pub use error::CartError;
pub use event::CartEvent;
pub use ids::{ProductId, SellerId};
pub use money::{Currency, Money};
pub use store::{CartStore, DEFAULT_STORAGE_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartLine, ProductSnapshot};
    pub use crate::checkout::{settle, PaymentItem, PaymentRequest, PaymentStatus};
    pub use crate::error::CartError;
    pub use crate::event::CartEvent;
    pub use crate::ids::{ProductId, SellerId};
    pub use crate::money::{Currency, Money};
    pub use crate::store::{CartStore, DEFAULT_STORAGE_KEY};
}
