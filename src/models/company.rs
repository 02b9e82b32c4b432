//! Company model. A company owns workers and contractors.

use serde::{Deserialize, Serialize};

/// A company account that owns worker records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// Request body for creating a new company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    pub name: String,
}
