//! Worker API endpoints.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use super::contractors::require_company;
use super::{success, ApiResult};
use crate::errors::AppError;
use crate::export;
use crate::models::{NewWorker, Worker};
use crate::AppState;

/// GET /api/companies/:id/workers - List a company's workers.
pub async fn list_workers(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> ApiResult<Vec<Worker>> {
    require_company(&state, &company_id).await?;
    success(state.repo.list_workers(&company_id).await?)
}

/// GET /api/workers/:id - Get a single worker.
pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Worker> {
    match state.repo.get_worker(&id).await? {
        Some(worker) => success(worker),
        None => Err(AppError::NotFound(format!("Worker {} not found", id))),
    }
}

/// POST /api/companies/:id/workers - Create a single worker.
pub async fn create_worker(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    Json(request): Json<NewWorker>,
) -> ApiResult<Worker> {
    require_company(&state, &company_id).await?;

    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Worker name is required".to_string()));
    }

    // Department references must point at the seeded set
    if let Some(department_id) = &request.department_id {
        if state.repo.get_department(department_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Unknown department {}",
                department_id
            )));
        }
    }

    // An assigned contractor must belong to the same company
    if let Some(contractor_id) = &request.contractor_id {
        match state.repo.get_contractor(contractor_id).await? {
            Some(contractor) if contractor.company_id == company_id => {}
            _ => {
                return Err(AppError::Validation(format!(
                    "Contractor {} is not registered under this company",
                    contractor_id
                )))
            }
        }
    }

    success(state.repo.create_worker(&company_id, &request).await?)
}

/// DELETE /api/workers/:id - Delete a worker.
pub async fn delete_worker(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_worker(&id).await?;
    success(())
}

/// GET /api/companies/:id/workers/export - Download a company's roster as
/// delimited text, in the same column layout the importer accepts.
pub async fn export_workers(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Response, AppError> {
    require_company(&state, &company_id).await?;

    let workers = state.repo.list_workers(&company_id).await?;
    let departments = state.repo.list_departments().await?;
    let body = export::workers_to_csv(&workers, &departments)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"workers.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
