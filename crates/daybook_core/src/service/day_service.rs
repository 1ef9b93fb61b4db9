//! Day use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for core callers over the archive.
//!
//! # Invariants
//! - Service APIs never bypass archive validation or conflict checks.
//! - Service layer remains storage-agnostic.

use crate::model::day::DayRecord;
use crate::repo::day_repo::{ArchiveResult, DayArchive};
use crate::storage::Storage;

/// Use-case wrapper over [`DayArchive`].
pub struct DayService<S: Storage> {
    archive: DayArchive<S>,
}

impl<S: Storage> DayService<S> {
    /// Creates a service using the provided archive.
    pub fn new(archive: DayArchive<S>) -> Self {
        Self { archive }
    }

    /// Starts a fresh record for `date` (`YYYY-MM-DD`).
    pub fn start_day(&self, date: &str) -> ArchiveResult<DayRecord> {
        self.archive.start_day(date)
    }

    /// Starts a fresh record and immediately pulls in the previous
    /// day's unfinished plans.
    ///
    /// # Contract
    /// - Fails with `SourceMissing` when the previous day was never
    ///   saved; the caller decides whether to fall back to
    ///   [`DayService::start_day`].
    pub fn start_day_carried(&self, date: &str) -> ArchiveResult<DayRecord> {
        let mut record = self.archive.start_day(date)?;
        self.archive.carry_forward(&mut record)?;
        Ok(record)
    }

    /// Copies the previous day's unfinished plans into `record`.
    pub fn carry_forward(&self, record: &mut DayRecord) -> ArchiveResult<usize> {
        self.archive.carry_forward(record)
    }

    /// Persists `record` at its derived path.
    pub fn save(&self, record: &DayRecord) -> ArchiveResult<()> {
        self.archive.save(record)
    }

    /// Loads the record stored at `path`.
    pub fn load(&self, path: &str) -> ArchiveResult<DayRecord> {
        self.archive.load(path)
    }
}
