//! Persistence layer over the storage collaborator.
//!
//! # Responsibility
//! - Own path derivation, the conflict policy, and the persisted
//!   envelope for day records.
//! - Isolate storage transport details from service orchestration.
//!
//! # Invariants
//! - Load paths reject invalid persisted state instead of masking it.
//! - Archive APIs return semantic errors (`PathConflict`,
//!   `SourceMissing`) in addition to transport errors.

pub mod day_repo;
