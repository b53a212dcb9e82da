//! File-backed storage backend.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::{StorageError, StoragePort};

/// Storage that keeps each key in its own file under a root directory.
///
/// Writes go to a temporary sibling file which is then renamed over the
/// target, so readers see either the old payload or the new one.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store rooted at `root`, creating the directory now.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).map_err(|e| {
            StorageError::Open(format!("{}: {}", store.root.display(), e))
        })?;
        Ok(store)
    }

    /// Resolve the file that holds `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.root.join(file_name_for(key)?))
    }
}

impl StoragePort for FileStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| StorageError::io(&self.root, e))?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = fs::File::create(&tmp).map_err(|e| StorageError::io(&tmp, e))?;
        file.write_all(bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| StorageError::io(&tmp, e))?;
        drop(file);

        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;
        tracing::trace!(path = %path.display(), bytes = bytes.len(), "wrote storage entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }
}

/// Map a storage key to a portable file name.
///
/// ASCII alphanumerics, `-`, `_` and `.` pass through; every other byte is
/// written as `%XX`. The result never contains a path separator.
fn file_name_for(key: &str) -> Result<String, StorageError> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                name.push(byte as char)
            }
            _ => name.push_str(&format!("%{:02X}", byte)),
        }
    }
    Ok(name)
}
