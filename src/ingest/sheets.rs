//! Remote sheet access through the Google Sheets v4 values API.
//!
//! The process holds a stored service credential (OAuth client plus refresh
//! token, the format written by Google's auth tooling); each fetch refreshes
//! an access token and reads the first worksheet of the addressed sheet.
//! Access goes through the [`SheetService`] trait so callers and tests can
//! substitute the transport.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use super::source::RosterRow;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Failure acquiring rows from a remote sheet. Always batch-level.
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("unrecognized sheet URL: {0}")]
    InvalidUrl(String),
    #[error("credentials: {0}")]
    Credentials(String),
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheets API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Read-only access to remotely hosted sheets.
#[async_trait]
pub trait SheetService: Send + Sync {
    /// Materialize the first worksheet of the sheet at `url` as header-keyed rows.
    async fn fetch_rows(&self, url: &str) -> Result<Vec<RosterRow>, SheetError>;
}

/// Stored service credential, compatible with the authorized-user JSON that
/// Google's client libraries persist.
#[derive(Debug, Clone, Deserialize)]
struct StoredCredentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

/// Production [`SheetService`] backed by the Google Sheets API.
pub struct GoogleSheetClient {
    credentials_path: PathBuf,
    http: reqwest::Client,
}

impl GoogleSheetClient {
    pub fn new(credentials_path: PathBuf) -> Self {
        Self {
            credentials_path,
            http: reqwest::Client::new(),
        }
    }

    fn load_credentials(&self) -> Result<StoredCredentials, SheetError> {
        let raw = std::fs::read_to_string(&self.credentials_path).map_err(|e| {
            SheetError::Credentials(format!(
                "cannot read {}: {}",
                self.credentials_path.display(),
                e
            ))
        })?;
        serde_json::from_str(&raw)
            .map_err(|e| SheetError::Credentials(format!("invalid credential file: {}", e)))
    }

    /// Exchange the stored refresh token for a short-lived access token.
    async fn access_token(&self) -> Result<String, SheetError> {
        let creds = self.load_credentials()?;

        let resp = self
            .http
            .post(&creds.token_uri)
            .form(&[
                ("client_id", creds.client_id.as_str()),
                ("client_secret", creds.client_secret.as_str()),
                ("refresh_token", creds.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetError::RefreshFailed(body));
        }

        let body: serde_json::Value = resp.json().await?;
        body["access_token"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| SheetError::RefreshFailed("no access_token in response".to_string()))
    }
}

/// Response shape of the values API.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[async_trait]
impl SheetService for GoogleSheetClient {
    async fn fetch_rows(&self, url: &str) -> Result<Vec<RosterRow>, SheetError> {
        let spreadsheet_id = spreadsheet_id_from_url(url)
            .ok_or_else(|| SheetError::InvalidUrl(url.to_string()))?;
        let token = self.access_token().await?;

        // An unqualified A1 range reads from the first worksheet.
        let endpoint = format!("{}/{}/values/A:ZZ", SHEETS_API_BASE, spreadsheet_id);
        let resp = self.http.get(&endpoint).bearer_auth(&token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let range: ValueRange = resp.json().await?;
        Ok(rows_from_values(range.values))
    }
}

/// Extract the spreadsheet ID from a sheet URL
/// (`https://docs.google.com/spreadsheets/d/<id>/...`).
pub fn spreadsheet_id_from_url(url: &str) -> Option<&str> {
    let rest = url.split("/spreadsheets/d/").nth(1)?;
    let id = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// First row as header, remaining rows keyed by it.
fn rows_from_values(values: Vec<Vec<serde_json::Value>>) -> Vec<RosterRow> {
    let mut records = values.into_iter();
    let headers: Vec<String> = match records.next() {
        Some(header) => header.iter().map(value_to_string).collect(),
        None => return Vec::new(),
    };

    records
        .map(|record| {
            RosterRow::from_pairs(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(name, value)| (name.clone(), value_to_string(value)))
                    .collect(),
            )
        })
        .filter(|row| !row.is_empty())
        .collect()
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
