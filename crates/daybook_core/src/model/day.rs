//! Day record domain model.
//!
//! # Responsibility
//! - Hold one calendar day's task state: today's list, tomorrow's plan,
//!   and the free-text note.
//! - Provide the pure task operations (create, toggle) and the canonical
//!   text rendering.
//!
//! # Invariants
//! - Task ids are unique within a list and assigned as `max + 1`.
//! - Id 0 is the sentinel entry (`"Survive"`, done) seeded into both
//!   lists at construction and never reassigned by normal creation.
//! - `path` is derived from `(root, date)` and nothing else.

use crate::model::date::DayDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task identifier within one list. Small, monotonically assigned.
pub type TaskId = u32;

/// Reserved id for the baseline entry present in every list.
pub const SENTINEL_TASK_ID: TaskId = 0;

const SENTINEL_TASK_TEXT: &str = "Survive";

/// One task line: description plus completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEntry {
    pub text: String,
    pub done: bool,
}

impl TaskEntry {
    fn open(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    fn sentinel() -> Self {
        Self {
            text: SENTINEL_TASK_TEXT.to_string(),
            done: true,
        }
    }
}

/// Error for status toggles addressing an id that is not in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownTaskId(pub TaskId);

impl Display for UnknownTaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no today task with id {}", self.0)
    }
}

impl Error for UnknownTaskId {}

/// Ordered task list. Ids grow monotonically, so key order is insertion
/// order.
pub type TaskList = BTreeMap<TaskId, TaskEntry>;

/// One calendar day's task state.
///
/// Purely in-memory; persistence and carry-forward live in the archive
/// layer so this model stays storage-agnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub date: DayDate,
    pub today_tasks: TaskList,
    pub tomorrow_tasks: TaskList,
    /// Free-form "insight of the day" text, empty until written.
    pub note: String,
    /// Root prefix this record is filed under. Explicit configuration,
    /// never ambient process state.
    pub root: String,
    /// Terminal storage path, derived from `(root, date)`.
    pub path: String,
}

impl DayRecord {
    /// Creates a fresh record for `date` under `root`.
    ///
    /// # Invariants
    /// - Both lists start with the sentinel entry only.
    /// - `note` starts empty.
    pub fn new(date: DayDate, root: impl Into<String>) -> Self {
        let root = root.into();
        let path = date.storage_path(&root);
        let seeded = TaskList::from([(SENTINEL_TASK_ID, TaskEntry::sentinel())]);
        Self {
            date,
            today_tasks: seeded.clone(),
            tomorrow_tasks: seeded,
            note: String::new(),
            root,
            path,
        }
    }

    /// Parses `date` (`YYYY-MM-DD`) and creates a fresh record.
    ///
    /// # Errors
    /// - [`crate::DateValidationError`] for malformed or out-of-range
    ///   input.
    pub fn parse(date: &str, root: impl Into<String>) -> crate::model::date::DateResult<Self> {
        Ok(Self::new(DayDate::parse(date)?, root))
    }

    /// Appends a new open task to today's list and returns its id.
    ///
    /// Repeated identical text is allowed as distinct entries.
    pub fn add_today(&mut self, text: impl Into<String>) -> TaskId {
        let id = next_task_id(&self.today_tasks);
        self.today_tasks.insert(id, TaskEntry::open(text));
        id
    }

    /// Appends a new open task to tomorrow's plan and returns its id.
    pub fn add_tomorrow(&mut self, text: impl Into<String>) -> TaskId {
        let id = next_task_id(&self.tomorrow_tasks);
        self.tomorrow_tasks.insert(id, TaskEntry::open(text));
        id
    }

    /// Flips the completion flag of a today task and returns the new
    /// value.
    ///
    /// Tomorrow entries have no toggle: plans only gain a status once
    /// they become today tasks.
    ///
    /// # Errors
    /// - [`UnknownTaskId`] when `id` is not in today's list.
    pub fn toggle_today(&mut self, id: TaskId) -> Result<bool, UnknownTaskId> {
        let entry = self.today_tasks.get_mut(&id).ok_or(UnknownTaskId(id))?;
        entry.done = !entry.done;
        Ok(entry.done)
    }
}

/// Canonical human-readable rendering.
///
/// Not a machine-parseable format; persistence uses the archive
/// envelope instead.
impl Display for DayRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\nDay Tasks:", self.date)?;
        for entry in self.today_tasks.values() {
            write!(f, "\n\t{}", entry.text)?;
        }
        write!(f, "\nTomorrow Tasks:")?;
        for entry in self.tomorrow_tasks.values() {
            write!(f, "\n\t{}", entry.text)?;
        }
        // Historical section spelling, kept for export compatibility.
        write!(f, "\nTodays insite:\n{}", self.note)
    }
}

fn next_task_id(list: &TaskList) -> TaskId {
    list.keys().next_back().map_or(0, |id| id + 1)
}
