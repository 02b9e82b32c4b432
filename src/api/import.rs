//! Roster import endpoint.
//!
//! Accepts a multipart form carrying at most one data source (an uploaded
//! tabular file or a remote sheet URL) and responds with the ingestion
//! report. Supplying neither is valid and yields an empty report.

use axum::extract::{Multipart, Path, State};

use super::contractors::require_company;
use super::{success, ApiResult};
use crate::errors::AppError;
use crate::ingest::source::RosterSource;
use crate::ingest::{self, IngestReport};
use crate::AppState;

/// POST /api/companies/:id/workers/import - Bulk-import a worker roster.
pub async fn import_roster(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    multipart: Multipart,
) -> ApiResult<IngestReport> {
    let company = require_company(&state, &company_id).await?;

    let source = extract_source(multipart).await?;
    let report = ingest::ingest_roster(&state.repo, state.sheets.as_ref(), &company, source).await?;

    success(report)
}

/// Pull the data source out of the multipart form. An uploaded file takes
/// precedence over a sheet URL when both are present.
async fn extract_source(mut multipart: Multipart) -> Result<Option<RosterSource>, AppError> {
    let mut file: Option<RosterSource> = None;
    let mut sheet: Option<RosterSource> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        match field.name() {
            Some("file") => {
                let name = field.file_name().unwrap_or("roster.csv").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?
                    .to_vec();
                if !bytes.is_empty() {
                    file = Some(RosterSource::File { name, bytes });
                }
            }
            Some("sheet_url") => {
                let url = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read sheet URL: {}", e)))?;
                if !url.trim().is_empty() {
                    sheet = Some(RosterSource::Sheet {
                        url: url.trim().to_string(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(file.or(sheet))
}
