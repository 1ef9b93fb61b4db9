//! Filesystem storage backend.
//!
//! # Responsibility
//! - Map the blob-store contract onto local files.
//! - Keep writes atomic via temp-file + rename so a crashed save never
//!   leaves a half-written record.

use super::{Storage, StorageError, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Blob store backed by the local filesystem.
///
/// Stateless; every key passed in is used as-is, so the configured root
/// prefix decides where records land.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for FsStorage {
    fn ensure_dir(&self, path: &str) -> StorageResult<()> {
        fs::create_dir_all(path).map_err(|source| StorageError::Io {
            path: path.to_string(),
            source,
        })
    }

    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn write_blob(&self, path: &str, bytes: &[u8]) -> StorageResult<()> {
        let staged = format!("{path}.tmp");
        fs::write(&staged, bytes).map_err(|source| StorageError::Io {
            path: staged.clone(),
            source,
        })?;
        fs::rename(&staged, path).map_err(|source| StorageError::Io {
            path: path.to_string(),
            source,
        })
    }

    fn read_blob(&self, path: &str) -> StorageResult<Vec<u8>> {
        fs::read(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StorageError::NotFound {
                    path: path.to_string(),
                }
            } else {
                StorageError::Io {
                    path: path.to_string(),
                    source,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::FsStorage;
    use crate::storage::{Storage, StorageError};

    #[test]
    fn write_then_read_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let path = dir.path().join("blob").display().to_string();

        storage.write_blob(&path, b"payload").unwrap();
        assert!(storage.exists(&path));
        assert_eq!(storage.read_blob(&path).unwrap(), b"payload");
    }

    #[test]
    fn read_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let path = dir.path().join("absent").display().to_string();

        let err = storage.read_blob(&path).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { path: p } if p == path));
    }

    #[test]
    fn ensure_dir_tolerates_existing_segments() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let nested = dir.path().join("2024/6").display().to_string();

        storage.ensure_dir(&nested).unwrap();
        storage.ensure_dir(&nested).unwrap();
        assert!(storage.exists(&nested));
    }

    #[test]
    fn write_overwrites_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new();
        let path = dir.path().join("blob").display().to_string();

        storage.write_blob(&path, b"first").unwrap();
        storage.write_blob(&path, b"second").unwrap();
        assert_eq!(storage.read_blob(&path).unwrap(), b"second");
    }
}
