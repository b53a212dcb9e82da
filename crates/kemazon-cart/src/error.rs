//! Cart error types.

use kemazon_storage::StorageError;
use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// Store mutations never return these. They surface from the payload codec,
/// the explicit [`CartStore::persist`](crate::CartStore::persist) flush, price
/// parsing and the checkout hand-off.
#[derive(Error, Debug)]
pub enum CartError {
    /// The persisted cart is missing, corrupt or fails to parse.
    #[error("Persisted cart unreadable: {0}")]
    PersistedStateUnreadable(String),

    /// The payload was written by a newer schema than this build understands.
    #[error("Unsupported cart schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u64, supported: u32 },

    /// A price is negative, not finite or not a number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Checkout was requested with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The payment provider only accepts one seller per transaction.
    #[error("Cart holds products from {count} sellers; only one seller can be paid per transaction")]
    MultipleSellers { count: usize },
}
