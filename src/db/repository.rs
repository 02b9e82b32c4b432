//! Database repository for CRUD operations.
//!
//! Uses prepared statements; worker inserts are row-scoped with no
//! transaction spanning a batch.

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{Company, Contractor, Department, NewWorker, Worker, WorkerStatus};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== COMPANY OPERATIONS ====================

    /// List all companies.
    pub async fn list_companies(&self) -> Result<Vec<Company>, AppError> {
        let rows = sqlx::query("SELECT id, name, created_at FROM companies ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(company_from_row).collect())
    }

    /// Get a company by ID.
    pub async fn get_company(&self, id: &str) -> Result<Option<Company>, AppError> {
        let row = sqlx::query("SELECT id, name, created_at FROM companies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(company_from_row))
    }

    /// Create a new company.
    pub async fn create_company(&self, name: &str) -> Result<Company, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO companies (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Company {
            id,
            name: name.to_string(),
            created_at: now,
        })
    }

    // ==================== CONTRACTOR OPERATIONS ====================

    /// List the contractors registered under a company.
    pub async fn list_contractors(&self, company_id: &str) -> Result<Vec<Contractor>, AppError> {
        let rows = sqlx::query(
            "SELECT id, company_id, name, created_at FROM contractors WHERE company_id = ? ORDER BY name",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(contractor_from_row).collect())
    }

    /// Get a contractor by ID.
    pub async fn get_contractor(&self, id: &str) -> Result<Option<Contractor>, AppError> {
        let row =
            sqlx::query("SELECT id, company_id, name, created_at FROM contractors WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.as_ref().map(contractor_from_row))
    }

    /// Register a contractor under a company.
    pub async fn create_contractor(
        &self,
        company_id: &str,
        name: &str,
    ) -> Result<Contractor, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query("INSERT INTO contractors (id, company_id, name, created_at) VALUES (?, ?, ?, ?)")
            .bind(&id)
            .bind(company_id)
            .bind(name)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(Contractor {
            id,
            company_id: company_id.to_string(),
            name: name.to_string(),
            created_at: now,
        })
    }

    // ==================== DEPARTMENT OPERATIONS ====================

    /// List all departments.
    pub async fn list_departments(&self) -> Result<Vec<Department>, AppError> {
        let rows = sqlx::query("SELECT id, name, description FROM departments ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(department_from_row).collect())
    }

    /// Get a department by ID.
    pub async fn get_department(&self, id: &str) -> Result<Option<Department>, AppError> {
        let row = sqlx::query("SELECT id, name, description FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(department_from_row))
    }

    // ==================== WORKER OPERATIONS ====================

    /// List a company's workers.
    pub async fn list_workers(&self, company_id: &str) -> Result<Vec<Worker>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, company_id, contractor_id, name, role, department_id, skill,
                      location, status, joining_date, tags, notes, contact, created_at
               FROM workers WHERE company_id = ? ORDER BY name"#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(worker_from_row).collect())
    }

    /// Get a worker by ID.
    pub async fn get_worker(&self, id: &str) -> Result<Option<Worker>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, company_id, contractor_id, name, role, department_id, skill,
                      location, status, joining_date, tags, notes, contact, created_at
               FROM workers WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(worker_from_row))
    }

    /// Insert a worker record owned by the given company.
    pub async fn create_worker(
        &self,
        company_id: &str,
        worker: &NewWorker,
    ) -> Result<Worker, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let joining_date = worker.joining_date.map(|d| d.to_string());

        sqlx::query(
            r#"INSERT INTO workers (
                id, company_id, contractor_id, name, role, department_id, skill,
                location, status, joining_date, tags, notes, contact, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(company_id)
        .bind(&worker.contractor_id)
        .bind(&worker.name)
        .bind(&worker.role)
        .bind(&worker.department_id)
        .bind(&worker.skill)
        .bind(&worker.location)
        .bind(worker.status.as_str())
        .bind(&joining_date)
        .bind(&worker.tags)
        .bind(&worker.notes)
        .bind(&worker.contact)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(Worker {
            id,
            company_id: company_id.to_string(),
            contractor_id: worker.contractor_id.clone(),
            name: worker.name.clone(),
            role: worker.role.clone(),
            department_id: worker.department_id.clone(),
            skill: worker.skill.clone(),
            location: worker.location.clone(),
            status: worker.status,
            joining_date: worker.joining_date,
            tags: worker.tags.clone(),
            notes: worker.notes.clone(),
            contact: worker.contact.clone(),
            created_at: now,
        })
    }

    /// Delete a worker.
    pub async fn delete_worker(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Worker {} not found", id)));
        }

        Ok(())
    }
}

// Helper functions for row conversion

fn company_from_row(row: &sqlx::sqlite::SqliteRow) -> Company {
    Company {
        id: row.get("id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn contractor_from_row(row: &sqlx::sqlite::SqliteRow) -> Contractor {
    Contractor {
        id: row.get("id"),
        company_id: row.get("company_id"),
        name: row.get("name"),
        created_at: row.get("created_at"),
    }
}

fn department_from_row(row: &sqlx::sqlite::SqliteRow) -> Department {
    Department {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

fn worker_from_row(row: &sqlx::sqlite::SqliteRow) -> Worker {
    let status: String = row.get("status");
    let joining_date: Option<String> = row.get("joining_date");

    Worker {
        id: row.get("id"),
        company_id: row.get("company_id"),
        contractor_id: row.get("contractor_id"),
        name: row.get("name"),
        role: row.get("role"),
        department_id: row.get("department_id"),
        skill: row.get("skill"),
        location: row.get("location"),
        status: WorkerStatus::from_str(&status).unwrap_or_default(),
        joining_date: joining_date.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        tags: row.get("tags"),
        notes: row.get("notes"),
        contact: row.get("contact"),
        created_at: row.get("created_at"),
    }
}
