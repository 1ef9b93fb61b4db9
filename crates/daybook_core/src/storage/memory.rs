//! In-memory storage backend.
//!
//! Lets tests exercise the full archive path without touching disk,
//! the same way an in-memory database stands in for a file-backed one.
//!
//! # Invariants
//! - Blob and directory keys live in separate namespaces, but `exists`
//!   answers for both, matching filesystem semantics.

use super::{Storage, StorageError, StorageResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// Map-backed blob store for tests and dry runs.
///
/// Single-threaded by contract, like the rest of the core; interior
/// mutability keeps the trait's `&self` signatures.
#[derive(Debug, Default)]
pub struct MemStorage {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
    dirs: RefCell<BTreeSet<String>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs. Test observability helper.
    pub fn blob_count(&self) -> usize {
        self.blobs.borrow().len()
    }
}

impl Storage for MemStorage {
    fn ensure_dir(&self, path: &str) -> StorageResult<()> {
        self.dirs.borrow_mut().insert(path.to_string());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.blobs.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn write_blob(&self, path: &str, bytes: &[u8]) -> StorageResult<()> {
        self.blobs.borrow_mut().insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read_blob(&self, path: &str) -> StorageResult<Vec<u8>> {
        self.blobs
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::MemStorage;
    use crate::storage::{Storage, StorageError};

    #[test]
    fn blobs_and_dirs_are_both_visible_to_exists() {
        let storage = MemStorage::new();
        storage.ensure_dir("root/2024/6").unwrap();
        storage.write_blob("root/2024/6/15", b"day").unwrap();

        assert!(storage.exists("root/2024/6"));
        assert!(storage.exists("root/2024/6/15"));
        assert!(!storage.exists("root/2024/6/16"));
        assert_eq!(storage.blob_count(), 1);
    }

    #[test]
    fn read_missing_blob_is_not_found() {
        let storage = MemStorage::new();
        let err = storage.read_blob("nowhere").unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }
}
