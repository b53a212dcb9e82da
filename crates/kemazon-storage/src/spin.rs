//! Spin Key-Value Store backend.

use crate::{StorageError, StoragePort};

/// Storage backed by Spin's Key-Value Store.
pub struct SpinStore {
    store: spin_sdk::key_value::Store,
}

impl SpinStore {
    /// Open the default Key-Value store.
    pub fn open_default() -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open_default()
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }

    /// Open a named Key-Value store.
    pub fn open(name: &str) -> Result<Self, StorageError> {
        let store = spin_sdk::key_value::Store::open(name)
            .map_err(|e| StorageError::Open(e.to_string()))?;
        Ok(Self { store })
    }
}

impl StoragePort for SpinStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        self.store
            .get(key)
            .map_err(|e| StorageError::Store(e.to_string()))
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.store
            .set(key, bytes)
            .map_err(|e| StorageError::Store(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.store
            .delete(key)
            .map_err(|e| StorageError::Store(e.to_string()))
    }
}
