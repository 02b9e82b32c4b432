//! Contractor model. Contractors belong to a company and can have workers assigned.

use serde::{Deserialize, Serialize};

/// A contractor registered under a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contractor {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub created_at: String,
}

/// Request body for registering a new contractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractorRequest {
    pub name: String,
}
