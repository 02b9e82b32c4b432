//! Department model.
//!
//! Departments are a fixed set seeded at startup; nothing in the application
//! creates new ones. Worker rows reference them by exact name lookup.

use serde::{Deserialize, Serialize};

/// The department names seeded into every new database.
pub const SEEDED_DEPARTMENTS: [&str; 4] = ["Civil", "Electrical", "Mechanical", "Plumbing"];

/// A pre-defined department that workers can be attached to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
