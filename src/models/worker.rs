//! Worker model. The record produced by roster ingestion and single-worker creation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employment status of a worker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Active,
    Inactive,
    OnLeave,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "active",
            WorkerStatus::Inactive => "inactive",
            WorkerStatus::OnLeave => "on_leave",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(WorkerStatus::Active),
            "inactive" => Some(WorkerStatus::Inactive),
            "on_leave" => Some(WorkerStatus::OnLeave),
            _ => None,
        }
    }
}

impl Default for WorkerStatus {
    fn default() -> Self {
        WorkerStatus::Active
    }
}

/// A worker record owned by exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: String,
    pub company_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractor_id: Option<String>,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    pub skill: String,
    pub location: String,
    pub status: WorkerStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<NaiveDate>,
    /// Comma-separated free-text tags, e.g. "Certified Electrician,Night Shift"
    pub tags: String,
    pub notes: String,
    /// Free-form contact string (email or phone)
    pub contact: String,
    pub created_at: String,
}

/// The fields of a worker record before it is persisted.
///
/// Produced by roster-row normalization and accepted as the single-worker
/// creation request body; text fields default to empty, status to `active`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorker {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: WorkerStatus,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub contractor_id: Option<String>,
}
