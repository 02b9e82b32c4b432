//! Department API endpoints.

use axum::extract::State;

use super::{success, ApiResult};
use crate::models::Department;
use crate::AppState;

/// GET /api/departments - List the pre-defined departments.
pub async fn list_departments(State(state): State<AppState>) -> ApiResult<Vec<Department>> {
    success(state.repo.list_departments().await?)
}
