//! Delimited-text serialization of worker records.
//!
//! Writes the same column set the ingestion pipeline recognizes, so an
//! ingested roster serializes back to its input field values (modulo the
//! documented defaults for absent input fields).

use std::collections::HashMap;

use crate::errors::AppError;
use crate::models::{Department, Worker};

/// Column order of the serialized output; matches the recognized ingestion columns.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "name",
    "role",
    "department",
    "skill",
    "location",
    "status",
    "joining_date",
    "tags",
    "notes",
    "contact",
];

/// Serialize workers to delimited text. Departments render by name.
pub fn workers_to_csv(workers: &[Worker], departments: &[Department]) -> Result<String, AppError> {
    let department_names: HashMap<&str, &str> = departments
        .iter()
        .map(|d| (d.id.as_str(), d.name.as_str()))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_COLUMNS)?;

    for worker in workers {
        let department = worker
            .department_id
            .as_deref()
            .and_then(|id| department_names.get(id).copied())
            .unwrap_or("");
        let joining_date = worker
            .joining_date
            .map(|d| d.to_string())
            .unwrap_or_default();

        writer.write_record([
            worker.name.as_str(),
            worker.role.as_str(),
            department,
            worker.skill.as_str(),
            worker.location.as_str(),
            worker.status.as_str(),
            joining_date.as_str(),
            worker.tags.as_str(),
            worker.notes.as_str(),
            worker.contact.as_str(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV writer: {}", e)))?;
    String::from_utf8(data).map_err(|e| AppError::Internal(format!("CSV encoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerStatus;
    use chrono::NaiveDate;

    fn worker(name: &str, department_id: Option<&str>) -> Worker {
        Worker {
            id: "w1".to_string(),
            company_id: "c1".to_string(),
            contractor_id: None,
            name: name.to_string(),
            role: "Welder".to_string(),
            department_id: department_id.map(|s| s.to_string()),
            skill: "TIG".to_string(),
            location: "Hamburg".to_string(),
            status: WorkerStatus::Active,
            joining_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            tags: "Certified,Night Shift".to_string(),
            notes: String::new(),
            contact: "alice@example.com".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_export_renders_department_by_name() {
        let departments = [Department {
            id: "dep-civil".to_string(),
            name: "Civil".to_string(),
            description: None,
        }];

        let csv = workers_to_csv(&[worker("Alice", Some("dep-civil"))], &departments).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), EXPORT_COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "Alice,Welder,Civil,TIG,Hamburg,active,2024-03-01,\"Certified,Night Shift\",,alice@example.com"
        );
    }

    #[test]
    fn test_export_unknown_department_renders_blank() {
        let csv = workers_to_csv(&[worker("Alice", Some("gone"))], &[]).unwrap();
        assert!(csv.lines().nth(1).unwrap().starts_with("Alice,Welder,,TIG"));
    }
}
