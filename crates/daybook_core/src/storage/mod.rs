//! Storage collaborator contract and backends.
//!
//! # Responsibility
//! - Define the string-keyed blob store interface the archive layer
//!   persists through.
//! - Provide the filesystem backend and the in-memory test backend.
//!
//! # Invariants
//! - `ensure_dir` is idempotent: an already-existing segment is success.
//! - No operation retries internally; failures surface to the caller.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod fs;
mod memory;

pub use fs::FsStorage;
pub use memory::MemStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level storage failure.
#[derive(Debug)]
pub enum StorageError {
    /// No blob at the requested path.
    NotFound { path: String },
    /// Permission, hardware, or other I/O failure.
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "no blob stored at `{path}`"),
            Self::Io { path, source } => write!(f, "storage I/O failed at `{path}`: {source}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Blob store used for day-record persistence.
///
/// Paths are opaque `/`-joined string keys; the archive layer derives
/// them from dates and never inspects backend layout.
pub trait Storage {
    /// Creates the directory chain for `path`, tolerating segments that
    /// already exist.
    fn ensure_dir(&self, path: &str) -> StorageResult<()>;

    /// Reports whether anything is stored at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Writes `bytes` at `path`, overwriting atomically where the
    /// backend supports it.
    fn write_blob(&self, path: &str, bytes: &[u8]) -> StorageResult<()>;

    /// Reads the blob at `path`.
    ///
    /// # Errors
    /// - `NotFound` when nothing is stored there.
    /// - `Io` for transport failures.
    fn read_blob(&self, path: &str) -> StorageResult<Vec<u8>>;
}

/// Shared references delegate, so one backend can serve an archive and
/// still be inspected by the caller.
impl<T: Storage + ?Sized> Storage for &T {
    fn ensure_dir(&self, path: &str) -> StorageResult<()> {
        (**self).ensure_dir(path)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn write_blob(&self, path: &str, bytes: &[u8]) -> StorageResult<()> {
        (**self).write_blob(path, bytes)
    }

    fn read_blob(&self, path: &str) -> StorageResult<Vec<u8>> {
        (**self).read_blob(path)
    }
}
