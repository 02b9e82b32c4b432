//! Roster ingestion pipeline.
//!
//! Accepts one tabular data source (uploaded file or remote sheet URL),
//! normalizes each row into a worker record owned by the uploading company,
//! and persists successful rows while collecting per-row failures. Two error
//! tiers: a source that cannot be materialized fails the whole batch with a
//! single recorded error and zero rows processed; a row that cannot be
//! normalized or persisted is recorded and never affects the rows after it.

pub mod normalize;
pub mod sheets;
pub mod source;

use serde::Serialize;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::Company;

use normalize::{normalize_row, DepartmentIndex};
use sheets::SheetService;
use source::{parse_rows, RosterRow, RosterSource};

/// One recorded ingestion failure: the offending row's raw content (or the
/// source context for batch-level failures) and the reason.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IngestError {
    pub row: String,
    pub reason: String,
}

/// Outcome of one ingestion request.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub imported: usize,
    pub errors: Vec<IngestError>,
}

impl IngestReport {
    fn source_failure(context: &str, reason: String) -> Self {
        Self {
            imported: 0,
            errors: vec![IngestError {
                row: context.to_string(),
                reason,
            }],
        }
    }
}

/// Run the ingestion pipeline for one company and at most one source.
///
/// Every input row yields exactly one outcome, a persisted worker or a
/// recorded error. No source at all is not an error; the report is empty.
/// Only a department-prefetch failure escapes as a server error.
pub async fn ingest_roster(
    repo: &Repository,
    sheets: &dyn SheetService,
    company: &Company,
    roster: Option<RosterSource>,
) -> Result<IngestReport, AppError> {
    let rows = match roster {
        None => Vec::new(),
        Some(RosterSource::File { name, bytes }) => match parse_rows(&name, &bytes) {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(file = %name, "roster file rejected: {}", e);
                return Ok(IngestReport::source_failure(&name, e.to_string()));
            }
        },
        Some(RosterSource::Sheet { url }) => match sheets.fetch_rows(&url).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(url = %url, "remote sheet rejected: {}", e);
                return Ok(IngestReport::source_failure(&url, e.to_string()));
            }
        },
    };

    let departments = DepartmentIndex::new(&repo.list_departments().await?);

    let mut report = IngestReport::default();
    for row in &rows {
        match insert_row(repo, &company.id, row, &departments).await {
            Ok(()) => report.imported += 1,
            Err(reason) => report.errors.push(IngestError {
                row: row.to_string(),
                reason,
            }),
        }
    }

    tracing::info!(
        company = %company.id,
        imported = report.imported,
        failed = report.errors.len(),
        "roster ingestion finished"
    );

    Ok(report)
}

async fn insert_row(
    repo: &Repository,
    company_id: &str,
    row: &RosterRow,
    departments: &DepartmentIndex,
) -> Result<(), String> {
    let worker = normalize_row(row, departments).map_err(|e| e.to_string())?;
    repo.create_worker(company_id, &worker)
        .await
        .map_err(|e| e.to_string())?;
    Ok(())
}
