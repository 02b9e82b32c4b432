//! Company API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Company, CreateCompanyRequest};
use crate::AppState;

/// GET /api/companies - List all companies.
pub async fn list_companies(State(state): State<AppState>) -> ApiResult<Vec<Company>> {
    success(state.repo.list_companies().await?)
}

/// GET /api/companies/:id - Get a single company.
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Company> {
    match state.repo.get_company(&id).await? {
        Some(company) => success(company),
        None => Err(AppError::NotFound(format!("Company {} not found", id))),
    }
}

/// POST /api/companies - Create a new company.
pub async fn create_company(
    State(state): State<AppState>,
    Json(request): Json<CreateCompanyRequest>,
) -> ApiResult<Company> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Company name is required".to_string()));
    }

    success(state.repo.create_company(request.name.trim()).await?)
}
