//! Contractor API endpoints.
//!
//! Contractors always register under an explicitly named company.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Contractor, CreateContractorRequest};
use crate::AppState;

/// GET /api/companies/:id/contractors - List a company's contractors.
pub async fn list_contractors(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> ApiResult<Vec<Contractor>> {
    require_company(&state, &company_id).await?;
    success(state.repo.list_contractors(&company_id).await?)
}

/// POST /api/companies/:id/contractors - Register a contractor.
pub async fn create_contractor(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(request): Json<CreateContractorRequest>,
) -> ApiResult<Contractor> {
    require_company(&state, &company_id).await?;

    if request.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Contractor name is required".to_string(),
        ));
    }

    success(
        state
            .repo
            .create_contractor(&company_id, request.name.trim())
            .await?,
    )
}

/// Fetch a company or fail with 404. Shared by the company-scoped handlers.
pub(super) async fn require_company(
    state: &AppState,
    id: &str,
) -> Result<crate::models::Company, AppError> {
    state
        .repo
        .get_company(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
}
