//! Day-record archive: persistence and carry-forward over a blob store.
//!
//! # Responsibility
//! - Create, save, and load day records at date-derived paths.
//! - Pull the previous day's unfinished plans into a current record.
//! - Keep the persisted envelope schema-checked so load never trusts
//!   stored bytes blindly.
//!
//! # Invariants
//! - The terminal path is always `root/Y/M/D` with plain decimal
//!   segments.
//! - Carry-forward reads the previous record but never mutates or
//!   re-persists it.
//! - Load re-validates date components and the envelope version before
//!   reconstructing a record.

use crate::model::date::{DateValidationError, DayDate};
use crate::model::day::{DayRecord, TaskList, SENTINEL_TASK_ID};
use crate::storage::{Storage, StorageError};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Version written into every persisted envelope. Readers reject
/// anything newer.
const SCHEMA_VERSION: u32 = 1;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Archive-layer error for record creation, persistence, and rollover.
#[derive(Debug)]
pub enum ArchiveError {
    /// Malformed or out-of-range date input (or stored date fields).
    Date(DateValidationError),
    /// A record already occupies the terminal path.
    PathConflict { path: String },
    /// Carry-forward found no persisted record for the previous day.
    SourceMissing { path: String, source: StorageError },
    /// Transport failure surfaced from the storage collaborator.
    Storage(StorageError),
    /// Stored envelope was written by a newer core than this one.
    UnsupportedSchemaVersion { found: u32, latest_supported: u32 },
    /// Stored bytes do not decode into a valid envelope.
    Malformed { path: String, detail: String },
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(err) => write!(f, "{err}"),
            Self::PathConflict { path } => {
                write!(f, "a day record already exists at `{path}`")
            }
            Self::SourceMissing { path, .. } => {
                write!(f, "no previous day record at `{path}`")
            }
            Self::Storage(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "stored record schema version {found} is newer than supported {latest_supported}"
            ),
            Self::Malformed { path, detail } => {
                write!(f, "invalid persisted day record at `{path}`: {detail}")
            }
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            Self::SourceMissing { source, .. } => Some(source),
            Self::Storage(err) => Some(err),
            Self::PathConflict { .. }
            | Self::UnsupportedSchemaVersion { .. }
            | Self::Malformed { .. } => None,
        }
    }
}

impl From<DateValidationError> for ArchiveError {
    fn from(value: DateValidationError) -> Self {
        Self::Date(value)
    }
}

impl From<StorageError> for ArchiveError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// What to do when a new record's terminal path is already occupied.
///
/// `save()` always downgrades to the warning behavior; the policy only
/// governs creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Fail loudly so a prior day's data is never silently overwritten.
    #[default]
    Fail,
    /// Log a warning and proceed.
    Warn,
}

/// Minimal decode used to gate on the envelope version before the full
/// shape is trusted.
#[derive(Debug, Deserialize)]
struct VersionProbe {
    schema_version: u32,
}

/// Persisted envelope for one day record. Field names are the wire
/// contract.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDay {
    schema_version: u32,
    year: u16,
    month: u8,
    day: u8,
    today_tasks: TaskList,
    tomorrow_tasks: TaskList,
    note: String,
    root: String,
}

/// Date-keyed archive of day records over a storage backend.
pub struct DayArchive<S> {
    storage: S,
    root: String,
    create_policy: ConflictPolicy,
}

impl<S: Storage> DayArchive<S> {
    /// Creates an archive rooted at `root` with the strict creation
    /// policy.
    pub fn new(storage: S, root: impl Into<String>) -> Self {
        Self {
            storage,
            root: root.into(),
            create_policy: ConflictPolicy::Fail,
        }
    }

    /// Replaces the creation-time conflict policy.
    pub fn with_create_policy(mut self, policy: ConflictPolicy) -> Self {
        self.create_policy = policy;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Starts a fresh record for `date` (`YYYY-MM-DD`).
    ///
    /// Ensures the `root/Y/M` directory chain exists (idempotently) and
    /// applies the configured conflict policy at the terminal path.
    ///
    /// # Errors
    /// - `Date` for malformed input.
    /// - `PathConflict` under `ConflictPolicy::Fail` when the path is
    ///   occupied.
    /// - `Storage` when directory creation fails.
    pub fn start_day(&self, date: &str) -> ArchiveResult<DayRecord> {
        let date = DayDate::parse(date)?;
        let record = DayRecord::new(date, self.root.as_str());

        self.storage.ensure_dir(&date.month_dir(&self.root))?;
        self.guard_terminal_path(&record.path, self.create_policy)?;

        info!(
            "event=day_start module=archive status=ok date={} path={}",
            date, record.path
        );
        Ok(record)
    }

    /// Persists `record` at its derived path, overwriting any prior
    /// blob after a non-fatal conflict warning.
    ///
    /// # Errors
    /// - `Storage` when the write fails.
    pub fn save(&self, record: &DayRecord) -> ArchiveResult<()> {
        self.guard_terminal_path(&record.path, ConflictPolicy::Warn)?;

        let bytes = encode_record(record)?;
        self.storage.write_blob(&record.path, &bytes)?;

        info!(
            "event=day_save module=archive status=ok date={} path={} bytes={}",
            record.date,
            record.path,
            bytes.len()
        );
        Ok(())
    }

    /// Loads and validates the record stored at `path`.
    ///
    /// Exact inverse of [`DayArchive::save`]: date, both task lists, and
    /// the note come back identical; the path is re-derived from the
    /// stored root and date.
    ///
    /// # Errors
    /// - `Storage` (including not-found) when the blob cannot be read.
    /// - `UnsupportedSchemaVersion` / `Malformed` / `Date` when the
    ///   envelope fails validation.
    pub fn load(&self, path: &str) -> ArchiveResult<DayRecord> {
        let bytes = self.storage.read_blob(path)?;
        let record = decode_record(path, &bytes)?;

        info!(
            "event=day_load module=archive status=ok date={} path={}",
            record.date, path
        );
        Ok(record)
    }

    /// Copies the previous day's unfinished plans into `record`.
    ///
    /// Locates the previous calendar date's record under the current
    /// record's root, and re-adds each non-sentinel `tomorrow_tasks`
    /// entry through `add_today`, so ids are freshly assigned here.
    /// Returns the number of tasks carried.
    ///
    /// # Contract
    /// - The previous record is read-only: never mutated, re-persisted,
    ///   or deleted.
    /// - On any failure the current record is left unchanged.
    ///
    /// # Errors
    /// - `SourceMissing` when no record is persisted for the previous
    ///   day; rollover requires that day to have been saved first.
    /// - `Storage` for transport failures, plus the load-time validation
    ///   errors.
    pub fn carry_forward(&self, record: &mut DayRecord) -> ArchiveResult<usize> {
        let previous_path = record.date.previous().storage_path(&record.root);

        let bytes = self
            .storage
            .read_blob(&previous_path)
            .map_err(|source| match source {
                StorageError::NotFound { .. } => ArchiveError::SourceMissing {
                    path: previous_path.clone(),
                    source,
                },
                other => ArchiveError::Storage(other),
            })?;
        let previous = decode_record(&previous_path, &bytes)?;

        let mut carried = 0;
        for (id, entry) in &previous.tomorrow_tasks {
            if *id == SENTINEL_TASK_ID {
                continue;
            }
            record.add_today(entry.text.clone());
            carried += 1;
        }

        info!(
            "event=carry_forward module=archive status=ok date={} source={} carried={}",
            record.date, previous_path, carried
        );
        Ok(carried)
    }

    fn guard_terminal_path(&self, path: &str, policy: ConflictPolicy) -> ArchiveResult<()> {
        if !self.storage.exists(path) {
            return Ok(());
        }
        match policy {
            ConflictPolicy::Fail => Err(ArchiveError::PathConflict {
                path: path.to_string(),
            }),
            ConflictPolicy::Warn => {
                warn!("event=path_conflict module=archive policy=warn path={path}");
                Ok(())
            }
        }
    }
}

fn encode_record(record: &DayRecord) -> ArchiveResult<Vec<u8>> {
    let stored = StoredDay {
        schema_version: SCHEMA_VERSION,
        year: record.date.year,
        month: record.date.month,
        day: record.date.day,
        today_tasks: record.today_tasks.clone(),
        tomorrow_tasks: record.tomorrow_tasks.clone(),
        note: record.note.clone(),
        root: record.root.clone(),
    };
    serde_json::to_vec(&stored).map_err(|err| ArchiveError::Malformed {
        path: record.path.clone(),
        detail: err.to_string(),
    })
}

fn decode_record(path: &str, bytes: &[u8]) -> ArchiveResult<DayRecord> {
    // Version gate first: an envelope from a newer core must be rejected
    // as such even when its shape no longer decodes.
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|err| ArchiveError::Malformed {
            path: path.to_string(),
            detail: err.to_string(),
        })?;
    if probe.schema_version > SCHEMA_VERSION {
        return Err(ArchiveError::UnsupportedSchemaVersion {
            found: probe.schema_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let stored: StoredDay =
        serde_json::from_slice(bytes).map_err(|err| ArchiveError::Malformed {
            path: path.to_string(),
            detail: err.to_string(),
        })?;

    let date = DayDate::from_parts(stored.year, stored.month, stored.day)?;
    let derived_path = date.storage_path(&stored.root);

    Ok(DayRecord {
        date,
        today_tasks: stored.today_tasks,
        tomorrow_tasks: stored.tomorrow_tasks,
        note: stored.note,
        root: stored.root,
        path: derived_path,
    })
}
