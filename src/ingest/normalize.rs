//! Row normalization: untyped roster rows to typed worker fields.
//!
//! Pure with respect to storage: department resolution happens against a
//! pre-fetched index, so the same function covers every source format.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{Department, NewWorker, WorkerStatus};

use super::source::RosterRow;

/// Date formats accepted for the `joining_date` column.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// A failure normalizing one row. Never aborts the batch.
#[derive(Debug, PartialEq, Eq)]
pub enum RowError {
    MissingName,
    UnknownStatus(String),
    UnparseableDate(String),
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::MissingName => write!(f, "name is required"),
            RowError::UnknownStatus(s) => write!(f, "unknown status {:?}", s),
            RowError::UnparseableDate(s) => write!(f, "unparseable joining_date {:?}", s),
        }
    }
}

impl std::error::Error for RowError {}

/// Exact-name department lookup, snapshotted once per batch.
pub struct DepartmentIndex {
    by_name: HashMap<String, String>,
}

impl DepartmentIndex {
    pub fn new(departments: &[Department]) -> Self {
        let by_name = departments
            .iter()
            .map(|d| (d.name.clone(), d.id.clone()))
            .collect();
        Self { by_name }
    }

    /// Resolve a department name to its ID. A miss is not an error.
    pub fn resolve(&self, name: &str) -> Option<String> {
        self.by_name.get(name).cloned()
    }
}

/// Normalize one roster row into the fields of a worker record.
///
/// - `name` is required and must be non-blank.
/// - `department` resolves by exact name; a miss yields no department
///   reference, never an error and never a new department.
/// - `status` defaults to active; values outside the enumeration fail the row.
/// - `joining_date` is optional; a present but unparseable value fails the row.
/// - Remaining recognized columns map directly, defaulting to the empty string.
pub fn normalize_row(
    row: &RosterRow,
    departments: &DepartmentIndex,
) -> Result<NewWorker, RowError> {
    let name = row.get("name").unwrap_or("");
    if name.trim().is_empty() {
        return Err(RowError::MissingName);
    }

    let department_id = row
        .get("department")
        .filter(|name| !name.is_empty())
        .and_then(|name| departments.resolve(name));

    let status = match row.get("status").filter(|s| !s.is_empty()) {
        Some(raw) => WorkerStatus::from_str(raw)
            .ok_or_else(|| RowError::UnknownStatus(raw.to_string()))?,
        None => WorkerStatus::Active,
    };

    let joining_date = match row.get("joining_date").filter(|d| !d.is_empty()) {
        Some(raw) => Some(parse_joining_date(raw)?),
        None => None,
    };

    Ok(NewWorker {
        name: name.to_string(),
        role: text_column(row, "role"),
        department_id,
        skill: text_column(row, "skill"),
        location: text_column(row, "location"),
        status,
        joining_date,
        tags: text_column(row, "tags"),
        notes: text_column(row, "notes"),
        contact: text_column(row, "contact"),
        contractor_id: None,
    })
}

fn text_column(row: &RosterRow, column: &str) -> String {
    row.get(column).unwrap_or("").to_string()
}

fn parse_joining_date(raw: &str) -> Result<NaiveDate, RowError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .ok_or_else(|| RowError::UnparseableDate(raw.to_string()))
}
