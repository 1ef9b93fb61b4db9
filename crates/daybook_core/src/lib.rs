//! Core domain logic for Daybook, a personal daily task tracker.
//! This crate is the single source of truth for day-record invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{DateValidationError, DayDate};
pub use model::day::{DayRecord, TaskEntry, TaskId, UnknownTaskId, SENTINEL_TASK_ID};
pub use repo::day_repo::{ArchiveError, ArchiveResult, ConflictPolicy, DayArchive};
pub use service::day_service::DayService;
pub use storage::{FsStorage, MemStorage, Storage, StorageError, StorageResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
