//! Calendar date model and date-keyed path derivation.
//!
//! # Responsibility
//! - Parse and validate `YYYY-MM-DD` input into a `DayDate`.
//! - Compute the previous calendar date for carry-forward.
//! - Derive deterministic storage paths from a date and a root prefix.
//!
//! # Invariants
//! - A constructed `DayDate` always holds a valid (year, month, day).
//! - February has 29 days whenever `year % 4 == 0`. The every-fourth-year
//!   rule applies to century years too; validation and carry-forward share
//!   this single calendar model.
//! - Storage paths render year/month/day as plain decimal segments.
//!   `2024/3/1` and `2024/03/01` are different keys; derivation never
//!   zero-pads.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Days per month, indexed by month number (index 0 unused).
const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const YEAR_MIN: u16 = 1;
const YEAR_MAX: u16 = 9999;

/// Accepted input shape. Lenient about zero-padding; range checks happen
/// after numeric conversion.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})-(\d{1,2})-(\d{1,2})$").expect("date shape pattern compiles")
});

pub type DateResult<T> = Result<T, DateValidationError>;

/// Validation error for date input and stored date components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValidationError {
    /// Input does not match the `YYYY-MM-DD` shape at all.
    Format { input: String },
    YearOutOfRange { year: u16 },
    MonthOutOfRange { month: u8 },
    DayOutOfRange { day: u8, month: u8, year: u16 },
}

impl Display for DateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format { input } => {
                write!(f, "date `{input}` does not match YYYY-MM-DD")
            }
            Self::YearOutOfRange { year } => {
                write!(f, "year {year} is outside {YEAR_MIN}..={YEAR_MAX}")
            }
            Self::MonthOutOfRange { month } => {
                write!(f, "month {month} is outside 1..=12")
            }
            Self::DayOutOfRange { day, month, year } => {
                write!(
                    f,
                    "day {day} is invalid for month {month} of year {year}"
                )
            }
        }
    }
}

impl Error for DateValidationError {}

/// Validated calendar date used to key one day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl DayDate {
    /// Builds a date from raw components, applying full range validation.
    ///
    /// Used by both string parsing and persisted-record decoding, so that
    /// stored state is re-checked instead of trusted.
    ///
    /// # Errors
    /// - `YearOutOfRange`, `MonthOutOfRange`, `DayOutOfRange` per field.
    pub fn from_parts(year: u16, month: u8, day: u8) -> DateResult<Self> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(DateValidationError::YearOutOfRange { year });
        }
        if !(1..=12).contains(&month) {
            return Err(DateValidationError::MonthOutOfRange { month });
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(DateValidationError::DayOutOfRange { day, month, year });
        }
        Ok(Self { year, month, day })
    }

    /// Parses a `YYYY-MM-DD` date string.
    ///
    /// Input may omit zero-padding (`2024-3-1` parses like `2024-03-01`);
    /// the canonical rendering is always padded.
    ///
    /// # Errors
    /// - `Format` when the shape is wrong (segment count, non-numeric).
    /// - Range errors as in [`DayDate::from_parts`].
    pub fn parse(input: &str) -> DateResult<Self> {
        let captures = DATE_SHAPE
            .captures(input)
            .ok_or_else(|| DateValidationError::Format {
                input: input.to_string(),
            })?;

        let field = |index: usize| -> DateResult<u16> {
            captures[index]
                .parse::<u16>()
                .map_err(|_| DateValidationError::Format {
                    input: input.to_string(),
                })
        };

        Self::from_parts(field(1)?, field(2)? as u8, field(3)? as u8)
    }

    /// Returns the previous calendar date.
    ///
    /// # Contract
    /// - Day 1 of January wraps to December 31 of the prior year.
    /// - Day 1 of any other month wraps to the last day of the prior
    ///   month, with February length decided by the `% 4` rule.
    /// - Any other day just decrements.
    pub fn previous(self) -> Self {
        if self.day > 1 {
            return Self {
                day: self.day - 1,
                ..self
            };
        }
        if self.month == 1 {
            return Self {
                year: self.year - 1,
                month: 12,
                day: 31,
            };
        }
        let month = self.month - 1;
        Self {
            year: self.year,
            month,
            day: days_in_month(self.year, month),
        }
    }

    /// Derives the terminal storage path for this date under `root`.
    ///
    /// Segments are plain decimal with no zero-padding. An empty root
    /// yields a process-local relative key.
    pub fn storage_path(&self, root: &str) -> String {
        format!("{}{}/{}/{}", joined_root(root), self.year, self.month, self.day)
    }

    /// Derives the `root/Y/M` directory that must exist before the
    /// terminal path can be written.
    pub fn month_dir(&self, root: &str) -> String {
        format!("{}{}/{}", joined_root(root), self.year, self.month)
    }
}

impl Display for DayDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Month length under the crate's calendar model.
///
/// February gets 29 days whenever `year % 4 == 0`, century years
/// included. This deliberately diverges from the Gregorian %100/%400
/// refinement and must stay in sync with [`DayDate::previous`].
pub fn days_in_month(year: u16, month: u8) -> u8 {
    let base = DAYS_IN_MONTH[month as usize];
    if month == 2 && year % 4 == 0 {
        base + 1
    } else {
        base
    }
}

fn joined_root(root: &str) -> String {
    if root.is_empty() {
        String::new()
    } else if root.ends_with('/') {
        root.to_string()
    } else {
        format!("{root}/")
    }
}
