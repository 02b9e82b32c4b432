//! Tabular source parsing.
//!
//! Every source (delimited text, binary workbook, remote sheet) is reduced to
//! the same shape before normalization: a sequence of [`RosterRow`] mappings
//! keyed by the source's header row.

use std::fmt;
use std::io::Cursor;
use std::path::Path;

use calamine::Reader;

/// An untyped roster row: column name to raw cell value, in source order.
///
/// No schema is enforced here; any subset of recognized columns may be
/// present and unrecognized columns ride along until normalization ignores
/// them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterRow {
    columns: Vec<(String, String)>,
}

impl RosterRow {
    pub fn from_pairs(columns: Vec<(String, String)>) -> Self {
        Self { columns }
    }

    /// Value of the first column with this exact name, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|(_, value)| value.is_empty())
    }
}

impl fmt::Display for RosterRow {
    /// Renders the raw content for error reporting, e.g. `{name="", role="Welder"}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={:?}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// A single ingestion data source, as supplied by the caller.
#[derive(Debug, Clone)]
pub enum RosterSource {
    /// An uploaded tabular file; the filename decides the parser.
    File { name: String, bytes: Vec<u8> },
    /// A URL addressing a remotely hosted sheet.
    Sheet { url: String },
}

/// Failure to materialize rows from a source. Always batch-level: the file
/// either parses as a whole or contributes zero rows.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to parse delimited file: {0}")]
    Delimited(#[from] csv::Error),
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    EmptyWorkbook,
}

/// Parse an uploaded file into roster rows.
///
/// A `.csv` extension (case-insensitive) selects the delimited-text parser;
/// any other extension is treated as a spreadsheet-native binary workbook.
pub fn parse_rows(filename: &str, bytes: &[u8]) -> Result<Vec<RosterRow>, SourceError> {
    if has_delimited_extension(filename) {
        parse_delimited(bytes)
    } else {
        parse_workbook(bytes)
    }
}

fn has_delimited_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Column-delimited text with a header row defining field names.
fn parse_delimited(bytes: &[u8]) -> Result<Vec<RosterRow>, SourceError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let columns = headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        rows.push(RosterRow::from_pairs(columns));
    }

    Ok(rows)
}

/// First sheet of a binary workbook, first row as header.
fn parse_workbook(bytes: &[u8]) -> Result<Vec<RosterRow>, SourceError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SourceError::EmptyWorkbook)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut cells = range.rows();
    let headers: Vec<String> = match cells.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => return Ok(Vec::new()),
    };

    let mut rows = Vec::new();
    for record in cells {
        let columns: Vec<(String, String)> = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), cell_to_string(cell)))
            .collect();
        let row = RosterRow::from_pairs(columns);
        // Trailing blank lines are common in spreadsheet exports.
        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

fn cell_to_string(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => format!("{}", dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_delimited_maps_headers_to_cells() {
        let data = b"name,role,department\nAlice,Welder,Civil\nBob,,\n";
        let rows = parse_rows("roster.csv", data).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Alice"));
        assert_eq!(rows[0].get("department"), Some("Civil"));
        assert_eq!(rows[1].get("name"), Some("Bob"));
        assert_eq!(rows[1].get("role"), Some(""));
    }

    #[test]
    fn test_parse_delimited_short_record() {
        // flexible parsing: missing trailing cells behave as absent columns
        let data = b"name,role\nAlice\n";
        let rows = parse_rows("roster.csv", data).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some("Alice"));
        assert_eq!(rows[0].get("role"), None);
    }

    #[test]
    fn test_parse_delimited_header_only() {
        let rows = parse_rows("roster.csv", b"name,role\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let rows = parse_rows("ROSTER.CSV", b"name\nAlice\n").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_non_csv_extension_goes_to_workbook_parser() {
        // Not a real workbook, so the whole source fails as a unit.
        let result = parse_rows("roster.xlsx", b"name,role\nAlice,Welder\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_row_display_shows_raw_content() {
        let row = RosterRow::from_pairs(vec![
            ("name".to_string(), String::new()),
            ("role".to_string(), "Welder".to_string()),
        ]);
        assert_eq!(row.to_string(), r#"{name="", role="Welder"}"#);
    }

    #[test]
    fn test_duplicate_column_returns_first() {
        let data = b"name,name\nAlice,Bob\n";
        let rows = parse_rows("roster.csv", data).unwrap();
        assert_eq!(rows[0].get("name"), Some("Alice"));
    }
}
