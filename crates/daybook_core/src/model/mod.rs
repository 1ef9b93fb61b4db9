//! Domain model for day records.
//!
//! # Responsibility
//! - Define the canonical data structures for one calendar day's state.
//! - Keep calendar arithmetic and task-list rules free of storage
//!   concerns.
//!
//! # Invariants
//! - A `DayDate` is always a valid date under the crate's calendar model.
//! - Every task list carries the reserved sentinel entry with id 0.

pub mod date;
pub mod day;
