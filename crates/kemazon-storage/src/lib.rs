//! Durable key-value storage for the Kemazon cart.
//!
//! The cart store never talks to a concrete backend. It persists through the
//! [`StoragePort`] trait, which has three adapters:
//!
//! - [`MemoryStore`] - in-process map, used by tests and ephemeral sessions
//! - [`FileStore`] - one file per key under a root directory
//! - `SpinStore` - Spin's Key-Value Store (only on `wasm32`)
//!
//! # Example
//!
//! ```rust
//! use kemazon_storage::{storage_key, MemoryStore, StoragePort};
//!
//! let store = MemoryStore::new();
//! let key = storage_key!("kemazon", "cart");
//!
//! store.write(&key, b"[]").unwrap();
//! assert_eq!(store.read(&key).unwrap().as_deref(), Some(&b"[]"[..]));
//! ```

mod error;
mod file;
mod memory;
mod port;
#[cfg(target_arch = "wasm32")]
mod spin;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use port::StoragePort;
#[cfg(target_arch = "wasm32")]
pub use spin::SpinStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, MemoryStore, StorageError, StoragePort};
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust
/// use kemazon_storage::storage_key;
///
/// let key = storage_key!("kemazon", "cart");
/// assert_eq!(key, "kemazon:cart");
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_storage_key_joins_parts() {
        assert_eq!(storage_key!("kemazon", "cart"), "kemazon:cart");
        assert_eq!(storage_key!("kemazon", "cart", 42), "kemazon:cart:42");
    }
}
